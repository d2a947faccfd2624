use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::encoder::{max_similarity, EncoderError, TextEncoder, Vector};
use crate::models::{
    speakers_in_order, AnchorSet, Classification, Role, ScoreTally, Utterance, Verdict,
};

/// Configuration for role classification
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Only the first `max_turns` utterances are examined
    pub max_turns: usize,
    /// Utterances with fewer trimmed characters are skipped
    pub min_text_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_turns: 6,
            min_text_chars: 5,
        }
    }
}

/// Encoded anchor phrases, one list per role
#[derive(Debug, Clone)]
pub struct AnchorVectors {
    pub agent: Vec<Vector>,
    pub customer: Vec<Vector>,
}

/// Decides which speaker is the agent by semantic closeness to anchor phrases
///
/// Anchor vectors are encoded on first use and reused by every later call.
pub struct RoleClassifier<E> {
    encoder: E,
    anchors: AnchorSet,
    config: ClassifierConfig,
    anchor_vectors: OnceCell<AnchorVectors>,
}

impl<E: TextEncoder> RoleClassifier<E> {
    pub fn new(encoder: E, anchors: AnchorSet, config: ClassifierConfig) -> Self {
        Self {
            encoder,
            anchors,
            config,
            anchor_vectors: OnceCell::new(),
        }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Encode the anchors now instead of on the first scored utterance
    pub async fn warm_up(&self) -> Result<&AnchorVectors, EncoderError> {
        self.anchor_vectors().await
    }

    async fn anchor_vectors(&self) -> Result<&AnchorVectors, EncoderError> {
        self.anchor_vectors
            .get_or_try_init(|| async {
                let agent = self.encoder.encode_batch(&self.anchors.phrases(Role::Agent)).await?;
                let customer = self
                    .encoder
                    .encode_batch(&self.anchors.phrases(Role::Customer))
                    .await?;
                info!(
                    "Encoded {} agent and {} customer anchors with {}",
                    agent.len(),
                    customer.len(),
                    self.encoder.name()
                );
                Ok::<_, EncoderError>(AnchorVectors { agent, customer })
            })
            .await
    }

    /// Assign agent and customer roles
    pub async fn classify(&self, transcript: &[Utterance]) -> Result<Verdict, EncoderError> {
        Ok(self.classify_detailed(transcript).await?.verdict)
    }

    /// Assign roles and keep the per-speaker tally
    ///
    /// 1. Register every speaker of the first `max_turns` utterances at 0.0
    /// 2. Score each long-enough utterance as
    ///    max agent similarity - max customer similarity
    /// 3. The top scorer is the agent, the earliest other speaker the customer
    pub async fn classify_detailed(
        &self,
        transcript: &[Utterance],
    ) -> Result<Classification, EncoderError> {
        let window = &transcript[..transcript.len().min(self.config.max_turns)];
        let speakers = speakers_in_order(window);
        let mut tally = ScoreTally::from_speakers(&speakers);

        let mut utterances_scored = 0;
        let mut utterances_skipped = 0;

        for (turn, utterance) in window.iter().enumerate() {
            let Some(text) = utterance.usable_text(self.config.min_text_chars) else {
                debug!("Turn {} ({}): skipped, too short", turn, utterance.speaker);
                utterances_skipped += 1;
                continue;
            };

            let anchors = self.anchor_vectors().await?;
            let vector = self.encoder.encode(text).await?;
            let agent_score = max_similarity(&vector, &anchors.agent);
            let customer_score = max_similarity(&vector, &anchors.customer);
            let delta = f64::from(agent_score) - f64::from(customer_score);

            debug!(
                "Turn {} ({}): agent={:.3} customer={:.3} delta={:+.3}",
                turn, utterance.speaker, agent_score, customer_score, delta
            );

            tally.add(&utterance.speaker, delta);
            utterances_scored += 1;
        }

        let verdict = if utterances_scored == 0 {
            Verdict::unknown()
        } else {
            Verdict::from_tally(&tally)
        };

        info!(
            "Scored {} of {} turns: agent={}, customer={}",
            utterances_scored,
            window.len(),
            verdict.agent,
            verdict.customer
        );

        Ok(Classification {
            verdict,
            tally,
            utterances_scored,
            utterances_skipped,
        })
    }
}
