//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod assessments;

pub use assessments::{
    AssessmentRecord, AssessmentRepository, CreateAssessmentRecord, HISTORY_LIMIT,
};
