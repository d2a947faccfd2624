pub mod classifier;
pub mod encoder;
pub mod io;
pub mod models;

pub use classifier::{ClassifierConfig, RoleClassifier};
pub use encoder::{
    cosine_similarity, EncoderError, HashingEncoder, HashingEncoderConfig, RemoteEncoder,
    RemoteEncoderConfig, TextEncoder, Vector,
};
pub use io::{parse_transcript_file, parse_transcript_json, sample_transcript, write_verdict};
pub use models::{AnchorSet, Classification, Role, ScoreTally, Utterance, Verdict};
