use super::{EncoderError, TextEncoder, Vector};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Configuration for the hashing encoder
#[derive(Debug, Clone)]
pub struct HashingEncoderConfig {
    /// Output vector dimension
    pub dimensions: usize,
}

impl Default for HashingEncoderConfig {
    fn default() -> Self {
        Self { dimensions: 1024 }
    }
}

/// Offline bag-of-words encoder
///
/// Lowercased word tokens are hashed (FNV-1a) into a fixed number of buckets
/// as term counts, then L2-normalized. Deterministic across runs and
/// platforms, with no model to load.
#[derive(Debug, Clone)]
pub struct HashingEncoder {
    config: HashingEncoderConfig,
}

impl HashingEncoder {
    pub fn new(config: HashingEncoderConfig) -> Result<Self, EncoderError> {
        if config.dimensions == 0 {
            return Err(EncoderError::Config(
                "hashing encoder needs at least one dimension".to_string(),
            ));
        }
        Ok(Self { config })
    }

    pub fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn embed(&self, text: &str) -> Vector {
        let mut vector = vec![0.0f32; self.config.dimensions];
        for token in tokenize(text) {
            let bucket = (fnv1a(token.as_bytes()) % self.config.dimensions as u64) as usize;
            vector[bucket] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Default for HashingEncoder {
    fn default() -> Self {
        Self {
            config: HashingEncoderConfig::default(),
        }
    }
}

impl TextEncoder for HashingEncoder {
    fn name(&self) -> &str {
        "hashing"
    }

    async fn encode(&self, text: &str) -> Result<Vector, EncoderError> {
        Ok(self.embed(text))
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vector>, EncoderError> {
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }
}

/// Lowercased runs of alphanumeric characters
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        (hash ^ b as u64).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::cosine_similarity;

    #[test]
    fn test_tokenize() {
        let tokens: Vec<String> = tokenize("Hello, I'm ¿Cómo ESTÁS?").collect();
        assert_eq!(tokens, vec!["hello", "i", "m", "cómo", "estás"]);
    }

    #[test]
    fn test_fnv1a_known_values() {
        assert_eq!(fnv1a(b""), FNV_OFFSET);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(HashingEncoder::new(HashingEncoderConfig { dimensions: 0 }).is_err());
    }

    #[tokio::test]
    async fn test_vectors_are_normalized_and_fixed_size() {
        let encoder = HashingEncoder::new(HashingEncoderConfig { dimensions: 64 }).unwrap();
        let vector = encoder.encode("How can I help you today?").await.unwrap();

        assert_eq!(vector.len(), 64);
        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_punctuation_only_text_is_zero_vector() {
        let encoder = HashingEncoder::default();
        let vector = encoder.encode("?!...").await.unwrap();
        assert!(vector.iter().all(|&v| v == 0.0));
    }

    #[tokio::test]
    async fn test_similar_text_scores_higher() {
        let encoder = HashingEncoder::default();
        let anchor = encoder.encode("How can I help you today?").await.unwrap();
        let close = encoder.encode("how can i help you").await.unwrap();
        let far = encoder.encode("My order hasn't arrived yet").await.unwrap();

        assert!(cosine_similarity(&anchor, &close) > 0.8);
        assert!(cosine_similarity(&anchor, &close) > cosine_similarity(&anchor, &far));
    }

    #[tokio::test]
    async fn test_batch_matches_single() {
        let encoder = HashingEncoder::default();
        let texts = vec!["first phrase".to_string(), "second phrase".to_string()];
        let batch = encoder.encode_batch(&texts).await.unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], encoder.encode("first phrase").await.unwrap());
        assert_eq!(batch[1], encoder.encode("second phrase").await.unwrap());
    }
}
