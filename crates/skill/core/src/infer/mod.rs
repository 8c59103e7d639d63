//! Statistical and rule-based parameter inference.

pub mod engine;
pub mod types;

pub use engine::ParameterInferencer;
pub use types::{InferenceResult, ParameterInference};
