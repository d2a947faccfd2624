use serde::Deserialize;

use super::Utterance;

/// Root response from Deepgram API
#[derive(Debug, Clone, Deserialize)]
pub struct DeepgramResponse {
    pub results: DeepgramResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepgramResults {
    pub channels: Vec<DeepgramChannel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepgramChannel {
    pub alternatives: Vec<DeepgramAlternative>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepgramAlternative {
    pub words: Vec<DeepgramWord>,
}

/// A single word from Deepgram with diarization info
#[derive(Debug, Clone, Deserialize)]
pub struct DeepgramWord {
    /// The recognized text
    pub word: String,
    /// Numeric speaker identifier
    pub speaker: u32,
    #[serde(default)]
    pub punctuated_word: Option<String>,
}

impl DeepgramResponse {
    /// Extract all words from the first channel's first alternative
    pub fn words(&self) -> &[DeepgramWord] {
        self.results
            .channels
            .first()
            .and_then(|c| c.alternatives.first())
            .map(|a| a.words.as_slice())
            .unwrap_or(&[])
    }

    /// Collapse consecutive same-speaker words into utterances
    ///
    /// Speakers are named `Speaker_<n>` after Deepgram's numeric label.
    pub fn to_utterances(&self) -> Vec<Utterance> {
        let mut utterances: Vec<Utterance> = Vec::new();
        let mut current: Option<(u32, Vec<&str>)> = None;

        for word in self.words() {
            let text = word.punctuated_word.as_deref().unwrap_or(&word.word);
            if let Some((speaker, words)) = current.as_mut() {
                if *speaker == word.speaker {
                    words.push(text);
                    continue;
                }
            }
            if let Some((speaker, words)) = current.replace((word.speaker, vec![text])) {
                utterances.push(Utterance::new(speaker_label(speaker), words.join(" ")));
            }
        }

        if let Some((speaker, words)) = current {
            utterances.push(Utterance::new(speaker_label(speaker), words.join(" ")));
        }

        utterances
    }
}

fn speaker_label(speaker: u32) -> String {
    format!("Speaker_{}", speaker)
}
