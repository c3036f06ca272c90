//! Analysis request state machine.
//!
//! A [`Session`] covers one analysis lifecycle: text submission through
//! a settled result or error, or teardown. The machine owns the single
//! [`RequestState`] instance; at most one request is in flight, and a
//! completion that arrives after teardown or a later submission is
//! discarded without mutating state.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::analysis::AnalysisResult;
use crate::adapters::Analyzer;

/// Minimum trimmed character count accepted for analysis
pub const DEFAULT_MIN_TEXT_CHARS: usize = 10;

/// State of an analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum RequestState {
    /// No request submitted yet
    Idle,

    /// A request is in flight
    Loading,

    /// The request settled with a result
    Success { result: AnalysisResult },

    /// The request settled with an error
    Failed { error: String },
}

/// Proof that a submission was accepted, keyed to its generation.
///
/// Settling requires the token; a token from a superseded or torn-down
/// submission no longer matches and its completion is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    generation: u64,
}

/// Outcome of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Transitioned to Loading; settle with the token
    Accepted(RequestToken),

    /// Rejected locally: not enough content. State unchanged.
    TooShort { trimmed_chars: usize, minimum: usize },

    /// A request is already in flight; the submit is a no-op
    InFlight,
}

/// A single analysis session, from submission to settlement or teardown
#[derive(Debug)]
pub struct Session {
    /// Unique identifier for this session
    pub id: Uuid,

    /// When the session was created
    pub started_at: DateTime<Utc>,

    state: RequestState,

    /// Bumped on every accepted submit and on teardown
    generation: u64,

    min_text_chars: usize,
}

impl Session {
    /// Create an idle session with the given minimum-content bound
    pub fn new(min_text_chars: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            state: RequestState::Idle,
            generation: 0,
            min_text_chars,
        }
    }

    /// Current request state
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Whether a request is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading)
    }

    /// Attempt to start an analysis.
    ///
    /// Text with fewer than the minimum trimmed characters is rejected
    /// locally and never reaches the network. While a request is in
    /// flight the submit is ignored, so two results can never land out
    /// of order. A submit from `Success` or `Failed` discards the prior
    /// outcome and starts over.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        if self.is_loading() {
            debug!(session = %self.id, "submit ignored: request in flight");
            return SubmitOutcome::InFlight;
        }

        let trimmed_chars = text.trim().chars().count();
        if trimmed_chars < self.min_text_chars {
            debug!(
                session = %self.id,
                trimmed_chars,
                minimum = self.min_text_chars,
                "submit rejected: text too short"
            );
            return SubmitOutcome::TooShort {
                trimmed_chars,
                minimum: self.min_text_chars,
            };
        }

        self.generation += 1;
        self.state = RequestState::Loading;
        debug!(session = %self.id, generation = self.generation, "request started");
        SubmitOutcome::Accepted(RequestToken {
            generation: self.generation,
        })
    }

    /// Settle an in-flight request with its outcome.
    ///
    /// Applies only when the token belongs to the current generation and
    /// a request is actually loading; anything else is a late completion
    /// and is discarded. Returns whether the outcome was applied.
    pub fn settle(&mut self, token: RequestToken, outcome: Result<AnalysisResult, String>) -> bool {
        if token.generation != self.generation || !self.is_loading() {
            warn!(
                session = %self.id,
                token_generation = token.generation,
                current_generation = self.generation,
                "discarding stale completion"
            );
            return false;
        }

        self.state = match outcome {
            Ok(result) => {
                debug!(session = %self.id, score = result.score, "request succeeded");
                RequestState::Success { result }
            }
            Err(error) => {
                debug!(session = %self.id, %error, "request failed");
                RequestState::Failed { error }
            }
        };
        true
    }

    /// Drive one full request cycle against an analyzer.
    ///
    /// Submits the text and, if accepted, awaits the service call and
    /// settles with its outcome. Rejected submits return immediately
    /// with no network traffic. Result processing always happens
    /// strictly after the `Loading` transition; there is no way to
    /// interleave a second request, since re-entrant submits are
    /// ignored until this one settles.
    pub async fn analyze(
        &mut self,
        analyzer: &dyn Analyzer,
        text: &str,
        call_timeout: Duration,
    ) -> SubmitOutcome {
        let outcome = self.submit(text);
        if let SubmitOutcome::Accepted(token) = outcome {
            let settled = analyzer
                .analyze(text, call_timeout)
                .await
                .map_err(|e| e.user_message());
            self.settle(token, settled);
        }
        outcome
    }

    /// Tear the session down.
    ///
    /// Returns to `Idle` and invalidates any in-flight request token, so
    /// its eventual completion cannot mutate state.
    pub fn end(&mut self) {
        self.generation += 1;
        self.state = RequestState::Idle;
        debug!(session = %self.id, "session ended");
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TEXT_CHARS)
    }
}
