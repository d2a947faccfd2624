use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::models::{DeepgramResponse, DiarizedResponse, Utterance};

/// Transcript used when no input file is given
pub fn sample_transcript() -> Vec<Utterance> {
    vec![
        Utterance::new(
            "Speaker_0",
            "Hello, thank you for calling Acme Corp, my name is Alex.",
        ),
        Utterance::new(
            "Speaker_1",
            "Hi Alex, I'm calling because my internet is down.",
        ),
    ]
}

/// Parse a transcript file into utterances
pub fn parse_transcript_file(path: &Path) -> Result<Vec<Utterance>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_transcript_json(&content)
}

/// Parse transcript JSON into utterances
///
/// Accepts a plain array of `{"speaker", "text"}` objects, a diarized
/// transcription response with `speaker_segments`, or a Deepgram response.
pub fn parse_transcript_json(json: &str) -> Result<Vec<Utterance>> {
    let value: Value = serde_json::from_str(json).context("Failed to parse transcript JSON")?;

    if value.is_array() {
        serde_json::from_value(value).context("Failed to parse utterance array")
    } else if value.get("speaker_segments").is_some() {
        let response: DiarizedResponse = serde_json::from_value(value)
            .context("Failed to parse diarized transcription response")?;
        Ok(response.to_utterances())
    } else if value.get("results").is_some() {
        let response: DeepgramResponse =
            serde_json::from_value(value).context("Failed to parse Deepgram JSON")?;
        Ok(response.to_utterances())
    } else {
        bail!("Unrecognized transcript format: expected an array of utterances")
    }
}
