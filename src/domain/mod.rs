//! Domain data structures.
//!
//! - `analysis`: analysis service result types (Span, AnalysisResult)
//! - `session`: per-submission request state machine

pub mod analysis;
pub mod session;

pub use analysis::{AnalysisMetadata, AnalysisResult, ReliabilityLevel, Span};
pub use session::{RequestState, RequestToken, Session, SubmitOutcome};
