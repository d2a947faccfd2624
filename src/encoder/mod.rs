pub mod hashing;
pub mod remote;

pub use hashing::*;
pub use remote::*;

use thiserror::Error;

/// Fixed-dimension text embedding
pub type Vector = Vec<f32>;

#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("embedding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("embedding API error: {status} - {body}")]
    Api { status: u16, body: String },
    #[error("embedding response is missing a vector for input #{0}")]
    MissingEmbedding(usize),
    #[error("embedding has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("cannot encode an empty batch")]
    EmptyInput,
    #[error("encoder configuration error: {0}")]
    Config(String),
}

/// Maps text to embedding vectors
///
/// Implementations must be order-preserving in `encode_batch` and return one
/// vector per input.
#[allow(async_fn_in_trait)]
pub trait TextEncoder {
    /// Short name for logs
    fn name(&self) -> &str;

    async fn encode(&self, text: &str) -> Result<Vector, EncoderError>;

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vector>, EncoderError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.encode(text).await?);
        }
        Ok(vectors)
    }
}

/// Cosine similarity in [-1, 1]
///
/// Returns 0.0 for zero-norm vectors or vectors of different length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        dot += x as f64 * y as f64;
        norm_a += x as f64 * x as f64;
        norm_b += y as f64 * y as f64;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0) as f32
}

/// Highest similarity between `vector` and any of `candidates`
pub fn max_similarity(vector: &[f32], candidates: &[Vector]) -> f32 {
    candidates
        .iter()
        .map(|c| cosine_similarity(vector, c))
        .fold(f32::NEG_INFINITY, f32::max)
}
