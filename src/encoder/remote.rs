use std::sync::OnceLock;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{EncoderError, TextEncoder, Vector};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Configuration for an OpenAI-compatible embeddings endpoint
#[derive(Debug, Clone)]
pub struct RemoteEncoderConfig {
    /// API key (from ROLECALL_EMBEDDINGS_API_KEY or OPENAI_API_KEY)
    pub api_key: String,
    /// Base URL without the `/embeddings` suffix
    pub base_url: String,
    /// Embedding model name
    pub model: String,
}

impl RemoteEncoderConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, EncoderError> {
        let api_key = std::env::var("ROLECALL_EMBEDDINGS_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                EncoderError::Config(
                    "ROLECALL_EMBEDDINGS_API_KEY (or OPENAI_API_KEY) environment variable not set"
                        .to_string(),
                )
            })?;

        let base_url = std::env::var("ROLECALL_EMBEDDINGS_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("ROLECALL_EMBEDDINGS_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self::new(api_key, base_url, model))
    }

    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            api_key,
            base_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.base_url.trim_end_matches('/'))
    }
}

/// Embeddings over HTTP
///
/// The HTTP client is built on first use and reused. The first response fixes
/// the vector dimension; later responses of another size are rejected.
pub struct RemoteEncoder {
    client: OnceLock<Client>,
    dimensions: OnceLock<usize>,
    config: RemoteEncoderConfig,
}

impl RemoteEncoder {
    pub fn new(config: RemoteEncoderConfig) -> Self {
        Self {
            client: OnceLock::new(),
            dimensions: OnceLock::new(),
            config,
        }
    }

    fn client(&self) -> &Client {
        self.client.get_or_init(Client::new)
    }

    async fn request(&self, texts: &[String]) -> Result<Vec<Vector>, EncoderError> {
        if texts.is_empty() {
            return Err(EncoderError::EmptyInput);
        }

        let request = EmbeddingRequest {
            model: &self.config.model,
            input: texts,
        };

        debug!(
            "Requesting {} embeddings from {}",
            texts.len(),
            self.config.model
        );

        let response = self
            .client()
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EncoderError::Api { status, body });
        }

        let response: EmbeddingResponse = response.json().await?;
        let vectors = collect_embeddings(response, texts.len())?;

        for vector in &vectors {
            let expected = *self.dimensions.get_or_init(|| vector.len());
            if vector.len() != expected {
                return Err(EncoderError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                });
            }
        }

        Ok(vectors)
    }
}

impl TextEncoder for RemoteEncoder {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn encode(&self, text: &str) -> Result<Vector, EncoderError> {
        let mut vectors = self.request(&[text.to_string()]).await?;
        vectors.pop().ok_or(EncoderError::MissingEmbedding(0))
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vector>, EncoderError> {
        self.request(texts).await
    }
}

/// Place each returned embedding at its input position
fn collect_embeddings(
    response: EmbeddingResponse,
    expected: usize,
) -> Result<Vec<Vector>, EncoderError> {
    let mut slots: Vec<Option<Vector>> = vec![None; expected];
    for (position, item) in response.data.into_iter().enumerate() {
        let index = item.index.unwrap_or(position);
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(item.embedding);
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| slot.ok_or(EncoderError::MissingEmbedding(i)))
        .collect()
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vector,
    #[serde(default)]
    index: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> EmbeddingResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = RemoteEncoderConfig::new(
            "key".to_string(),
            "http://localhost:8080/v1/".to_string(),
            "mini".to_string(),
        );
        assert_eq!(config.endpoint(), "http://localhost:8080/v1/embeddings");
    }

    #[test]
    fn test_request_serialization() {
        let input = vec!["hello".to_string(), "hola".to_string()];
        let request = EmbeddingRequest {
            model: "mini",
            input: &input,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"model": "mini", "input": ["hello", "hola"]}));
    }

    #[test]
    fn test_collect_embeddings_reorders_by_index() {
        let response = parse(
            r#"{"object": "list", "data": [
                {"object": "embedding", "index": 1, "embedding": [0.0, 1.0]},
                {"object": "embedding", "index": 0, "embedding": [1.0, 0.0]}
            ], "model": "mini"}"#,
        );

        let vectors = collect_embeddings(response, 2).unwrap();
        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_collect_embeddings_without_index_uses_position() {
        let response = parse(r#"{"data": [{"embedding": [0.5]}, {"embedding": [0.25]}]}"#);
        let vectors = collect_embeddings(response, 2).unwrap();
        assert_eq!(vectors, vec![vec![0.5], vec![0.25]]);
    }

    #[test]
    fn test_collect_embeddings_missing_entry() {
        let response = parse(r#"{"data": [{"index": 0, "embedding": [0.5]}]}"#);
        let result = collect_embeddings(response, 2);
        assert!(matches!(result, Err(EncoderError::MissingEmbedding(1))));
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let encoder = RemoteEncoder::new(RemoteEncoderConfig::new(
            "key".to_string(),
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_MODEL.to_string(),
        ));
        let result = encoder.encode_batch(&[]).await;
        assert!(matches!(result, Err(EncoderError::EmptyInput)));
    }
}
