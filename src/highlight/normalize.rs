//! Span validation and ordering.
//!
//! The analyzer's spans arrive unordered and untrusted. Normalization
//! checks each span against the source text and produces a
//! deterministically ordered list for the segment renderer.
//!
//! # Design Decisions
//!
//! - **Reject, don't repair**: a span that violates its index contract
//!   is excluded with a recorded reason, never silently clamped
//! - **No overlap resolution here**: overlapping spans pass through
//!   untouched; the renderer owns the overlap policy, so no evidence is
//!   dropped at this stage
//! - **UTF-8 byte offsets**: offsets index raw bytes and must land on
//!   char boundaries

use thiserror::Error;

use crate::domain::Span;

/// Why a span was excluded from rendering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanViolation {
    #[error("empty or inverted range: start {start} >= end {end}")]
    EmptyRange { start: usize, end: usize },

    #[error("end {end} beyond text length {len}")]
    OutOfBounds { end: usize, len: usize },

    #[error("offset {offset} is not a char boundary")]
    NotCharBoundary { offset: usize },

    #[error("span text does not match source slice at {start}..{end}")]
    TextMismatch { start: usize, end: usize },
}

/// Outcome of normalizing a span set against its source text
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Valid spans, sorted by start asc, end asc, arrival order
    pub spans: Vec<Span>,
    /// Excluded spans with the violated contract
    pub rejected: Vec<(Span, SpanViolation)>,
}

impl Normalized {
    /// Whether any spans were excluded
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Check a single span against the source text contract
fn validate(source: &str, span: &Span) -> Result<(), SpanViolation> {
    if span.start >= span.end {
        return Err(SpanViolation::EmptyRange {
            start: span.start,
            end: span.end,
        });
    }
    if span.end > source.len() {
        return Err(SpanViolation::OutOfBounds {
            end: span.end,
            len: source.len(),
        });
    }
    for offset in [span.start, span.end] {
        if !source.is_char_boundary(offset) {
            return Err(SpanViolation::NotCharBoundary { offset });
        }
    }
    // The quoted text is verified against the source, not trusted
    if source[span.start..span.end] != *span.text {
        return Err(SpanViolation::TextMismatch {
            start: span.start,
            end: span.end,
        });
    }
    Ok(())
}

/// Validate and order a span set against its source text.
///
/// Valid spans are sorted ascending by `start`, ties broken by ascending
/// `end` (shorter span first); the sort is stable, so spans that tie on
/// both keys keep their arrival order. Invalid spans are excluded and
/// reported in [`Normalized::rejected`].
///
/// Pure and idempotent: re-normalizing the output yields the same list.
pub fn normalize(source: &str, spans: &[Span]) -> Normalized {
    let mut normalized = Normalized::default();

    for span in spans {
        match validate(source, span) {
            Ok(()) => normalized.spans.push(span.clone()),
            Err(violation) => normalized.rejected.push((span.clone(), violation)),
        }
    }

    normalized
        .spans
        .sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    normalized
}
