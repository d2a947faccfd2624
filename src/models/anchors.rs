use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_ANCHORS_JSON: &str = include_str!("../../anchors/default.json");

/// Conversational role a speaker can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Agent,
    Customer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Agent => write!(f, "agent"),
            Role::Customer => write!(f, "customer"),
        }
    }
}

/// A representative phrase for one role in one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorPhrase {
    /// Language code (e.g., "en", "es")
    pub language: String,
    pub role: Role,
    pub phrase: String,
}

#[derive(Debug, Error)]
pub enum AnchorError {
    #[error("failed to read anchor file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid anchor JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("anchor set has no phrases for role '{0}'")]
    MissingRole(Role),
    #[error("anchor #{0} has a blank phrase")]
    BlankPhrase(usize),
}

/// Ordered anchor phrases for both roles
///
/// Order is the declaration order of the source data and is preserved by
/// every accessor.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorSet {
    anchors: Vec<AnchorPhrase>,
}

impl AnchorSet {
    /// Build a set from raw triples, rejecting sets that cannot score both roles
    pub fn new(anchors: Vec<AnchorPhrase>) -> Result<Self, AnchorError> {
        if let Some(index) = anchors.iter().position(|a| a.phrase.trim().is_empty()) {
            return Err(AnchorError::BlankPhrase(index));
        }
        for role in [Role::Agent, Role::Customer] {
            if !anchors.iter().any(|a| a.role == role) {
                return Err(AnchorError::MissingRole(role));
            }
        }
        Ok(Self { anchors })
    }

    /// The bundled English and Spanish anchors
    pub fn builtin() -> Self {
        Self::from_json(DEFAULT_ANCHORS_JSON).expect("bundled anchors are valid")
    }

    pub fn from_json(json: &str) -> Result<Self, AnchorError> {
        let anchors: Vec<AnchorPhrase> = serde_json::from_str(json)?;
        Self::new(anchors)
    }

    /// Load anchors from a JSON file of `{language, role, phrase}` objects
    pub fn load(path: &Path) -> Result<Self, AnchorError> {
        let content = std::fs::read_to_string(path).map_err(|source| AnchorError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Keep only anchors in the given languages
    pub fn filter_languages(&self, languages: &[String]) -> Result<Self, AnchorError> {
        let anchors = self
            .anchors
            .iter()
            .filter(|a| languages.iter().any(|l| l.eq_ignore_ascii_case(&a.language)))
            .cloned()
            .collect();
        Self::new(anchors)
    }

    /// Phrases for a role, in declaration order
    pub fn phrases(&self, role: Role) -> Vec<String> {
        self.anchors
            .iter()
            .filter(|a| a.role == role)
            .map(|a| a.phrase.clone())
            .collect()
    }

    /// Distinct languages in declaration order
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = Vec::new();
        for anchor in &self.anchors {
            if !languages.contains(&anchor.language.as_str()) {
                languages.push(&anchor.language);
            }
        }
        languages
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl Default for AnchorSet {
    fn default() -> Self {
        Self::builtin()
    }
}
