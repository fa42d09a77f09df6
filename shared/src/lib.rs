//! BodyMetrics Shared Library
//!
//! This crate contains the pure body-composition metrics engine plus the
//! models, API types, and validation shared by the backend and WASM
//! modules. It performs no I/O; everything is recomputed on demand from
//! immutable inputs.

pub mod errors;
pub mod metrics;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use metrics::*;
pub use types::*;

// Export models (the engine types they build on come from `metrics`)
pub use models::{
    Assessment, AssessmentInput, AssessmentResults, Circumferences, Classification, PatientProfile,
};
