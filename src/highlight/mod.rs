//! Span normalization and segment rendering.
//!
//! Both halves are pure, synchronous functions over their inputs: the
//! normalizer validates and orders the analyzer's spans, the renderer
//! turns them into a plain/highlight segment stream for presentation.

pub mod normalize;
pub mod segments;

pub use normalize::{normalize, Normalized, SpanViolation};
pub use segments::{segments, Segment, Segments};
