pub mod role_classifier;

pub use role_classifier::*;
