use serde::{Deserialize, Serialize};

use super::{ScoreTally, SpeakerId};

/// Placeholder for a role no observed speaker could fill
pub const UNKNOWN_SPEAKER: &str = "unknown";

/// Which speaker is the agent and which is the customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub agent: SpeakerId,
    pub customer: SpeakerId,
}

impl Verdict {
    pub fn new(agent: impl Into<SpeakerId>, customer: impl Into<SpeakerId>) -> Self {
        Self {
            agent: agent.into(),
            customer: customer.into(),
        }
    }

    /// Neither role could be assigned
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_SPEAKER, UNKNOWN_SPEAKER)
    }

    /// Derive a verdict from a finished tally
    ///
    /// The leader becomes the agent and the earliest other speaker the customer.
    pub fn from_tally(tally: &ScoreTally) -> Self {
        let Some(agent) = tally.leader() else {
            return Self::unknown();
        };
        let customer = tally
            .first_other_than(agent)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_SPEAKER);
        Self::new(agent.as_str(), customer)
    }

    pub fn is_unknown(&self) -> bool {
        self.agent == UNKNOWN_SPEAKER && self.customer == UNKNOWN_SPEAKER
    }
}

/// A verdict together with the evidence it was derived from
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub verdict: Verdict,
    /// Final per-speaker scores
    pub tally: ScoreTally,
    /// Utterances that were encoded and scored
    pub utterances_scored: usize,
    /// Utterances within the window skipped as too short or empty
    pub utterances_skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_to_agent_customer_object() {
        let verdict = Verdict::new("Speaker_0", "Speaker_1");
        let json = serde_json::to_string(&verdict).unwrap();
        assert_eq!(json, r#"{"agent":"Speaker_0","customer":"Speaker_1"}"#);
    }

    #[test]
    fn test_from_empty_tally() {
        let verdict = Verdict::from_tally(&ScoreTally::default());
        assert!(verdict.is_unknown());
    }

    #[test]
    fn test_from_single_speaker_tally() {
        let speakers = vec!["Speaker_1".to_string()];
        let verdict = Verdict::from_tally(&ScoreTally::from_speakers(&speakers));
        assert_eq!(verdict, Verdict::new("Speaker_1", UNKNOWN_SPEAKER));
        assert!(!verdict.is_unknown());
    }

    #[test]
    fn test_from_two_speaker_tally() {
        let speakers = vec!["Speaker_0".to_string(), "Speaker_1".to_string()];
        let mut tally = ScoreTally::from_speakers(&speakers);
        tally.add("Speaker_1", 0.3);
        tally.add("Speaker_0", -0.1);

        let verdict = Verdict::from_tally(&tally);
        assert_eq!(verdict, Verdict::new("Speaker_1", "Speaker_0"));
    }
}
