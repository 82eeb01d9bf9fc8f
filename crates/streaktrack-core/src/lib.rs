//! # Streaktrack Core Library
//!
//! Core business logic for the Streaktrack daily-comment streak tracker.
//! All operations are available through the standalone CLI binary; any
//! richer frontend is expected to be a thin rendering layer over this
//! library.
//!
//! ## Architecture
//!
//! - **Streak Engine**: a pure function of `(record, now)` that classifies
//!   a log attempt against the eligibility window and produces the updated
//!   record value
//! - **Tiers**: an injectable badge ladder mapping a streak to its current
//!   label, next target and progress fraction
//! - **Storage**: SQLite-based user store with guarded updates, and
//!   TOML-based configuration
//! - **View**: serializable status summaries for renderers
//!
//! ## Key Components
//!
//! - [`StreakEngine`]: eligibility evaluation and the log-comment transition
//! - [`TierTable`]: badge ladder lookup
//! - [`UserStore`]: record persistence and the leaderboard query
//! - [`Config`]: application configuration management

pub mod engine;
pub mod error;
pub mod storage;
pub mod tier;
pub mod user;
pub mod view;

pub use engine::{CommentEligibility, EligibilityWindow, StreakEngine};
pub use error::{ConfigError, CoreError, DataError, StoreError};
pub use storage::{Config, LeaderboardEntry, UserStore};
pub use tier::{Tier, TierStatus, TierTable};
pub use user::UserRecord;
pub use view::{BadgeView, StatusView};
