//! Segment rendering: plain/highlight decomposition of analyzed text.
//!
//! Walks normalized spans against the source text and yields an ordered
//! sequence of segments. Concatenating segment contents in order
//! reconstructs the source exactly; no two highlighted segments overlap.
//!
//! Overlap policy: **first-registered span wins**. A span that starts
//! before the cursor (inside an already-highlighted region) is clipped
//! to the cursor; a span clipped to nothing is skipped. The original
//! frontend left this case undefined, so the policy is fixed here
//! explicitly.

use crate::domain::Span;

/// A contiguous piece of the rendered output.
///
/// Highlighted iff `span` is present; `content` always borrows from the
/// source text, so segments of one rendering never overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<'a> {
    /// The covered slice of the source text
    pub content: &'a str,
    /// The span backing a highlight, carrying reason and confidence
    pub span: Option<&'a Span>,
}

impl<'a> Segment<'a> {
    pub fn is_highlight(&self) -> bool {
        self.span.is_some()
    }
}

/// Lazy segment iterator over a source text and its ordered spans.
///
/// Restartable: the iterator is `Clone`, and [`segments`] can be called
/// again on the same inputs to re-render from the start.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    source: &'a str,
    spans: &'a [Span],
    /// Byte offset of the next unemitted source byte
    cursor: usize,
    /// Index of the next span to consider
    next_span: usize,
    /// Highlight queued behind a pending plain gap
    pending: Option<(usize, usize, &'a Span)>,
}

/// Render `source` against spans already ordered by [`super::normalize`].
///
/// Passing unordered or invalid spans voids the reconstruction
/// guarantee; callers go through the normalizer first.
pub fn segments<'a>(source: &'a str, spans: &'a [Span]) -> Segments<'a> {
    Segments {
        source,
        spans,
        cursor: 0,
        next_span: 0,
        pending: None,
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        // Emit a highlight deferred behind its preceding plain gap
        if let Some((start, end, span)) = self.pending.take() {
            self.cursor = end;
            return Some(Segment {
                content: &self.source[start..end],
                span: Some(span),
            });
        }

        while self.next_span < self.spans.len() {
            let span = &self.spans[self.next_span];
            self.next_span += 1;

            // First-registered wins: clip to the cursor, skip if consumed
            let start = span.start.max(self.cursor);
            let end = span.end;
            if start >= end {
                continue;
            }

            if start > self.cursor {
                let gap = Segment {
                    content: &self.source[self.cursor..start],
                    span: None,
                };
                self.pending = Some((start, end, span));
                self.cursor = start;
                return Some(gap);
            }

            self.cursor = end;
            return Some(Segment {
                content: &self.source[start..end],
                span: Some(span),
            });
        }

        // Trailing plain remainder
        if self.cursor < self.source.len() {
            let rest = Segment {
                content: &self.source[self.cursor..],
                span: None,
            };
            self.cursor = self.source.len();
            return Some(rest);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, source: &str) -> Span {
        Span {
            text: source[start..end].to_string(),
            start,
            end,
            reason: "test".to_string(),
            confidence: 0.5,
        }
    }

    fn reconstruct(source: &str, spans: &[Span]) -> String {
        segments(source, spans).map(|s| s.content).collect()
    }

    #[test]
    fn test_empty_spans_single_plain() {
        let source = "nothing suspicious here";
        let rendered: Vec<_> = segments(source, &[]).collect();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].content, source);
        assert!(!rendered[0].is_highlight());
    }

    #[test]
    fn test_empty_text_no_segments() {
        let rendered: Vec<_> = segments("", &[]).collect();
        assert!(rendered.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let source = "abcdefghijklmnopqrst";
        let spans = vec![span(2, 5, source), span(8, 12, source), span(15, 20, source)];
        assert_eq!(reconstruct(source, &spans), source);
    }

    #[test]
    fn test_leading_span_no_empty_plain() {
        let source = "abcdef";
        let spans = vec![span(0, 3, source)];
        let rendered: Vec<_> = segments(source, &spans).collect();
        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].is_highlight());
        assert_eq!(rendered[0].content, "abc");
        assert_eq!(rendered[1].content, "def");
    }

    #[test]
    fn test_abutting_spans_no_gap() {
        let source = "abcdefgh";
        let spans = vec![span(0, 4, source), span(4, 8, source)];
        let rendered: Vec<_> = segments(source, &spans).collect();
        assert_eq!(rendered.len(), 2);
        assert!(rendered.iter().all(Segment::is_highlight));
        assert_eq!(reconstruct(source, &spans), source);
    }

    #[test]
    fn test_overlap_clips_second_span() {
        let source = "abcdefghijklmno";
        let spans = vec![span(0, 10, source), span(5, 15, source)];
        let rendered: Vec<_> = segments(source, &spans).collect();

        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].content, &source[0..10]);
        assert_eq!(rendered[1].content, &source[10..15]);
        assert!(rendered.iter().all(Segment::is_highlight));
        assert_eq!(reconstruct(source, &spans), source);
    }

    #[test]
    fn test_contained_span_skipped() {
        let source = "abcdefghij";
        let spans = vec![span(0, 8, source), span(2, 6, source)];
        let rendered: Vec<_> = segments(source, &spans).collect();

        let highlights: Vec<_> = rendered.iter().filter(|s| s.is_highlight()).collect();
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].content, &source[0..8]);
        assert_eq!(reconstruct(source, &spans), source);
    }

    #[test]
    fn test_restartable() {
        let source = "abcdefghij";
        let spans = vec![span(3, 6, source)];
        let iter = segments(source, &spans);
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_highlight_carries_span_metadata() {
        let source = "watch this phrase closely";
        let spans = vec![span(6, 17, source)];
        let highlight = segments(source, &spans)
            .find(Segment::is_highlight)
            .unwrap();
        let backing = highlight.span.unwrap();
        assert_eq!(backing.reason, "test");
        assert_eq!(backing.confidence, 0.5);
    }

    #[test]
    fn test_breaking_news_scenario() {
        let source = "Breaking!!! This is 100% certainly true, share now!";
        let spans = vec![span(0, 11, source), span(21, 34, source)];
        let rendered: Vec<_> = segments(source, &spans).collect();

        let contents: Vec<_> = rendered.iter().map(|s| s.content).collect();
        assert_eq!(
            contents,
            vec![
                "Breaking!!!",
                " This is 1",
                "00% certainly",
                " true, share now!"
            ]
        );
        assert!(rendered[0].is_highlight());
        assert!(!rendered[1].is_highlight());
        assert!(rendered[2].is_highlight());
        assert!(!rendered[3].is_highlight());
        assert_eq!(reconstruct(source, &spans), source);
    }
}
