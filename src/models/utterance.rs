use serde::{Deserialize, Serialize};

/// Opaque speaker identifier as it appears in the transcript (e.g. "Speaker_0")
pub type SpeakerId = String;

/// A single speaker turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Who spoke
    pub speaker: SpeakerId,
    /// What was said; absent entries are tolerated and never scored
    #[serde(default)]
    pub text: Option<String>,
}

impl Utterance {
    pub fn new(speaker: impl Into<SpeakerId>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: Some(text.into()),
        }
    }

    /// Trimmed text, if the utterance carries at least `min_chars` characters
    ///
    /// Characters are counted as Unicode scalar values so accented text is
    /// measured the same way as ASCII.
    pub fn usable_text(&self, min_chars: usize) -> Option<&str> {
        let text = self.text.as_deref()?.trim();
        if text.chars().count() < min_chars {
            None
        } else {
            Some(text)
        }
    }
}

/// Distinct speakers in order of first appearance
pub fn speakers_in_order(utterances: &[Utterance]) -> Vec<SpeakerId> {
    let mut speakers: Vec<SpeakerId> = Vec::new();
    for utterance in utterances {
        if !speakers.iter().any(|s| *s == utterance.speaker) {
            speakers.push(utterance.speaker.clone());
        }
    }
    speakers
}
