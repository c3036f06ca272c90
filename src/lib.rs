//! veritas - text reliability analysis client
//!
//! A client for a remote analysis service that scores text
//! trustworthiness and flags suspicious phrases. The service is treated
//! as an opaque capability; this crate owns everything in front of it:
//!
//! # Architecture
//!
//! - Spans arrive unordered and untrusted; the normalizer validates
//!   them against the source text and orders them deterministically
//! - The renderer turns normalized spans into a plain/highlight
//!   segment stream whose concatenation reconstructs the source exactly
//! - A session state machine (Idle → Loading → Success/Failed) drives
//!   submission, allows one request in flight, and discards completions
//!   that land after teardown
//!
//! # Modules
//!
//! - `adapters`: analysis service integrations (HTTP)
//! - `domain`: data structures (AnalysisResult, Span, Session)
//! - `highlight`: span normalization and segment rendering
//! - `config`: service URL, timeouts, and scoring thresholds
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Analyze text from stdin
//! echo "some text to check for reliability" | veritas analyze
//!
//! # Analyze a file
//! veritas analyze --input article.txt
//!
//! # Check the service
//! veritas health
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod highlight;

// Re-export main types at crate root for convenience
pub use adapters::{Analyzer, HttpAnalyzer, ServiceError};
pub use domain::{AnalysisResult, ReliabilityLevel, RequestState, Session, Span, SubmitOutcome};
pub use highlight::{normalize, segments, Normalized, Segment, SpanViolation};
