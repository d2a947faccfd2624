use serde::Deserialize;

use super::Utterance;

/// Diarized transcription response carrying per-speaker segments
/// (Whisper-style `verbose_json` with diarization enabled)
#[derive(Debug, Clone, Deserialize)]
pub struct DiarizedResponse {
    pub speaker_segments: Vec<SpeakerSegment>,
    /// Total audio duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerSegment {
    #[serde(default)]
    pub speaker_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
}

impl DiarizedResponse {
    /// Segments in start-time order as utterances
    ///
    /// A segment without a speaker keeps an empty speaker id rather than being
    /// dropped, so turn positions still line up with the source.
    pub fn to_utterances(&self) -> Vec<Utterance> {
        let mut segments: Vec<&SpeakerSegment> = self.speaker_segments.iter().collect();
        segments.sort_by(|a, b| a.start.total_cmp(&b.start));

        segments
            .into_iter()
            .map(|s| Utterance {
                speaker: s.speaker_id.clone().unwrap_or_default(),
                text: s.text.clone(),
            })
            .collect()
    }
}
