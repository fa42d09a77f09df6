//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the shared metrics engine, and external systems.

pub mod ai;
pub mod assessment;
pub mod export;
pub mod share;

pub use ai::AiClient;
pub use assessment::AssessmentService;
pub use export::ExportService;
pub use share::ShareService;
