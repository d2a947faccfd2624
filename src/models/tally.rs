use serde::Serialize;

use super::SpeakerId;

/// Running agent-ness score per speaker, kept in first-appearance order
///
/// Speakers are registered up front; scores only change through [`ScoreTally::add`]
/// on an already-registered speaker.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreTally {
    entries: Vec<(SpeakerId, f64)>,
}

impl ScoreTally {
    /// Register each distinct speaker at 0.0, preserving first appearance
    pub fn from_speakers<'a>(speakers: impl IntoIterator<Item = &'a SpeakerId>) -> Self {
        let mut tally = Self::default();
        for speaker in speakers {
            if tally.get(speaker).is_none() {
                tally.entries.push((speaker.clone(), 0.0));
            }
        }
        tally
    }

    /// Add a signed score to a registered speaker. Returns false if unknown.
    pub fn add(&mut self, speaker: &str, delta: f64) -> bool {
        match self.entries.iter_mut().find(|(s, _)| s == speaker) {
            Some((_, score)) => {
                *score += delta;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, speaker: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| s == speaker)
            .map(|(_, score)| *score)
    }

    /// Speaker with the highest score; the earliest registered wins ties
    pub fn leader(&self) -> Option<&SpeakerId> {
        let mut best: Option<&(SpeakerId, f64)> = None;
        for entry in &self.entries {
            match best {
                Some((_, best_score)) if entry.1 <= *best_score => {}
                _ => best = Some(entry),
            }
        }
        best.map(|(speaker, _)| speaker)
    }

    /// First registered speaker that is not `speaker`
    pub fn first_other_than(&self, speaker: &str) -> Option<&SpeakerId> {
        self.entries
            .iter()
            .map(|(s, _)| s)
            .find(|s| s.as_str() != speaker)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SpeakerId, f64)> {
        self.entries.iter().map(|(s, score)| (s, *score))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<SpeakerId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_speakers_dedups_in_order() {
        let speakers = ids(&["B", "A", "B", "C", "A"]);
        let tally = ScoreTally::from_speakers(&speakers);

        let order: Vec<&str> = tally.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert!(tally.iter().all(|(_, score)| score == 0.0));
    }

    #[test]
    fn test_add_only_touches_registered_speakers() {
        let speakers = ids(&["A", "B"]);
        let mut tally = ScoreTally::from_speakers(&speakers);

        assert!(tally.add("A", 0.5));
        assert!(tally.add("A", -0.2));
        assert!(!tally.add("Z", 1.0));

        assert!((tally.get("A").unwrap() - 0.3).abs() < 1e-9);
        assert_eq!(tally.get("B"), Some(0.0));
        assert_eq!(tally.get("Z"), None);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn test_leader_picks_highest() {
        let speakers = ids(&["A", "B", "C"]);
        let mut tally = ScoreTally::from_speakers(&speakers);
        tally.add("A", -0.4);
        tally.add("B", 0.1);
        tally.add("C", 0.05);

        assert_eq!(tally.leader().map(String::as_str), Some("B"));
    }

    #[test]
    fn test_leader_ties_go_to_first_appearance() {
        let speakers = ids(&["A", "B"]);
        let mut tally = ScoreTally::from_speakers(&speakers);
        assert_eq!(tally.leader().map(String::as_str), Some("A"));

        tally.add("A", 0.25);
        tally.add("B", 0.25);
        assert_eq!(tally.leader().map(String::as_str), Some("A"));
    }

    #[test]
    fn test_leader_all_negative() {
        let speakers = ids(&["A", "B"]);
        let mut tally = ScoreTally::from_speakers(&speakers);
        tally.add("A", -0.9);
        tally.add("B", -0.1);

        assert_eq!(tally.leader().map(String::as_str), Some("B"));
    }

    #[test]
    fn test_first_other_than() {
        let speakers = ids(&["A", "B", "C"]);
        let tally = ScoreTally::from_speakers(&speakers);
        assert_eq!(tally.first_other_than("A").map(String::as_str), Some("B"));
        assert_eq!(tally.first_other_than("B").map(String::as_str), Some("A"));

        let solo = ScoreTally::from_speakers(&ids(&["A"]));
        assert_eq!(solo.first_other_than("A"), None);
    }

    #[test]
    fn test_empty() {
        let tally = ScoreTally::default();
        assert!(tally.is_empty());
        assert_eq!(tally.leader(), None);
    }
}
