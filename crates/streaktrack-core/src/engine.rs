//! Comment eligibility and the streak state machine.
//!
//! The engine is a pure function of `(record, now)`: it holds no process
//! state of its own, and callers supply the clock. Eligibility is decided
//! by the elapsed time since the last logged comment against a two-bound
//! window: under the lower bound logging is rejected, over the upper bound
//! the streak restarts at 1, and inside the window (bounds inclusive) the
//! streak extends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserRecord;

/// The elapsed-time band governing streak continuation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EligibilityWindow {
    /// Minimum hours between comments; under this, logging is rejected
    #[serde(default = "default_min_hours")]
    pub min_hours: f64,
    /// Hours after which the streak breaks and restarts at 1
    #[serde(default = "default_break_hours")]
    pub break_hours: f64,
}

fn default_min_hours() -> f64 {
    7.0
}
fn default_break_hours() -> f64 {
    32.0
}

impl Default for EligibilityWindow {
    fn default() -> Self {
        Self {
            min_hours: default_min_hours(),
            break_hours: default_break_hours(),
        }
    }
}

/// Classification of a log attempt against a user's record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CommentEligibility {
    /// No prior activity; logging starts a new streak of 1
    NoPriorActivity,
    /// Under the minimum gap; logging is rejected, nothing mutates
    TooSoon { elapsed_hours: f64 },
    /// Inside the window (bounds inclusive); the streak extends by 1
    Continuable { elapsed_hours: f64 },
    /// Past the break bound; logging is allowed but the streak restarts at 1
    Resettable { elapsed_hours: f64 },
}

impl CommentEligibility {
    /// Whether a log attempt may proceed.
    pub fn allows_logging(&self) -> bool {
        !matches!(self, CommentEligibility::TooSoon { .. })
    }

    /// Whether a successful log restarts the streak at 1.
    pub fn resets_streak(&self) -> bool {
        matches!(
            self,
            CommentEligibility::NoPriorActivity | CommentEligibility::Resettable { .. }
        )
    }

    /// Elapsed hours since the last comment, when there was one.
    pub fn elapsed_hours(&self) -> Option<f64> {
        match self {
            CommentEligibility::NoPriorActivity => None,
            CommentEligibility::TooSoon { elapsed_hours }
            | CommentEligibility::Continuable { elapsed_hours }
            | CommentEligibility::Resettable { elapsed_hours } => Some(*elapsed_hours),
        }
    }
}

/// Pure streak evaluator over `(record, now)`.
pub struct StreakEngine {
    window: EligibilityWindow,
}

impl StreakEngine {
    /// Create an engine with the canonical 7h/32h window.
    pub fn new() -> Self {
        Self {
            window: EligibilityWindow::default(),
        }
    }

    /// Create an engine with a custom window.
    pub fn with_window(window: EligibilityWindow) -> Self {
        Self { window }
    }

    /// The window this engine evaluates against.
    pub fn window(&self) -> EligibilityWindow {
        self.window
    }

    /// Classify a log attempt at `now` against the record.
    ///
    /// Boundary policy: exactly `min_hours` or exactly `break_hours`
    /// elapsed both count as continuation.
    pub fn evaluate(&self, record: &UserRecord, now: DateTime<Utc>) -> CommentEligibility {
        let Some(last) = record.last_commented else {
            return CommentEligibility::NoPriorActivity;
        };

        let elapsed_hours = (now - last).num_seconds() as f64 / 3600.0;
        if elapsed_hours < self.window.min_hours {
            CommentEligibility::TooSoon { elapsed_hours }
        } else if elapsed_hours > self.window.break_hours {
            CommentEligibility::Resettable { elapsed_hours }
        } else {
            CommentEligibility::Continuable { elapsed_hours }
        }
    }

    /// Produce the record value after a successful log at `now`.
    ///
    /// Exactly one call advances `total_days` by exactly 1; the new streak
    /// is recomputed from the eligibility classification, never adjusted
    /// anywhere else.
    ///
    /// Precondition: [`evaluate`](Self::evaluate) did not return
    /// [`CommentEligibility::TooSoon`] for this `(record, now)`. Calling
    /// it anyway is a caller bug.
    pub fn log_comment(&self, record: &UserRecord, now: DateTime<Utc>) -> UserRecord {
        let eligibility = self.evaluate(record, now);
        debug_assert!(eligibility.allows_logging(), "log_comment called on TooSoon");

        let streak = if eligibility.resets_streak() {
            1
        } else {
            record.streak + 1
        };

        UserRecord {
            name: record.name.clone(),
            streak,
            total_days: record.total_days + 1,
            last_commented: Some(now),
        }
    }
}

impl Default for StreakEngine {
    fn default() -> Self {
        Self::new()
    }
}
