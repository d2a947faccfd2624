pub mod anchors;
pub mod deepgram;
pub mod segments;
pub mod tally;
pub mod utterance;
pub mod verdict;

pub use anchors::*;
pub use deepgram::*;
pub use segments::*;
pub use tally::*;
pub use utterance::*;
pub use verdict::*;
