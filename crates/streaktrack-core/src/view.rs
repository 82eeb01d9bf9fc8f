//! Status view builder.
//!
//! Turns an evaluated record into a serializable summary for renderers:
//! the eligibility message, streak metrics, progress toward the next badge
//! and the full badge checklist. Renderers (the CLI today) only format
//! what is here; none of the streak arithmetic leaks into them.

use serde::{Deserialize, Serialize};

use crate::engine::{CommentEligibility, EligibilityWindow};
use crate::tier::{TierStatus, TierTable};
use crate::user::UserRecord;

/// One badge on the checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeView {
    pub label: String,
    pub threshold: u32,
    pub unlocked: bool,
    /// Days still needed, for locked badges
    pub days_to_go: Option<u32>,
}

/// Everything a renderer needs to show after an evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusView {
    pub name: String,
    pub streak: u32,
    pub total_days: u32,
    pub eligibility: CommentEligibility,
    /// Human-readable message for the eligibility outcome
    pub message: String,
    pub tier: TierStatus,
    /// Preformatted "N/M days to <badge>" line, absent once the ladder
    /// is complete
    pub progress_line: Option<String>,
    pub badges: Vec<BadgeView>,
}

impl StatusView {
    /// Assemble the view for a record that `eligibility` was computed from.
    pub fn build(
        record: &UserRecord,
        eligibility: CommentEligibility,
        window: EligibilityWindow,
        table: &TierTable,
    ) -> Self {
        let tier = table.tier_for(record.streak);
        let message = eligibility_message(eligibility, window);
        let progress_line = tier.next.as_ref().map(|next| {
            format!("{}/{} days to {}", record.streak, next.threshold, next.label)
        });
        let badges = table
            .tiers()
            .iter()
            .map(|t| BadgeView {
                label: t.label.clone(),
                threshold: t.threshold,
                unlocked: record.streak >= t.threshold,
                days_to_go: (record.streak < t.threshold).then(|| t.threshold - record.streak),
            })
            .collect();

        Self {
            name: record.name.clone(),
            streak: record.streak,
            total_days: record.total_days,
            eligibility,
            message,
            tier,
            progress_line,
            badges,
        }
    }
}

/// The message a renderer shows for an eligibility outcome.
pub fn eligibility_message(eligibility: CommentEligibility, window: EligibilityWindow) -> String {
    match eligibility {
        CommentEligibility::NoPriorActivity => {
            "No comments yet. Log your first one to start a streak!".to_string()
        }
        CommentEligibility::TooSoon { elapsed_hours } => {
            let remaining = (window.min_hours - elapsed_hours).max(0.0);
            format!(
                "You already logged a comment in the last {:.0} hours. Try again in {:.1}h.",
                window.min_hours, remaining
            )
        }
        CommentEligibility::Continuable { elapsed_hours } => {
            format!(
                "{:.1}h since your last comment. Log now to keep the streak going!",
                elapsed_hours
            )
        }
        CommentEligibility::Resettable { elapsed_hours } => {
            format!(
                "Streak broken: {:.1}h since your last comment (limit {:.0}h). Logging restarts at day 1.",
                elapsed_hours, window.break_hours
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(streak: u32, total_days: u32, hours_ago: Option<f64>) -> UserRecord {
        UserRecord {
            name: "asha".to_string(),
            streak,
            total_days,
            last_commented: hours_ago
                .map(|h| Utc::now() - Duration::seconds((h * 3600.0) as i64)),
        }
    }

    fn build(record: &UserRecord, eligibility: CommentEligibility) -> StatusView {
        StatusView::build(
            record,
            eligibility,
            EligibilityWindow::default(),
            &TierTable::default(),
        )
    }

    #[test]
    fn too_soon_message_names_the_wait() {
        let view = build(
            &record(5, 12, Some(3.0)),
            CommentEligibility::TooSoon { elapsed_hours: 3.0 },
        );
        assert!(view.message.contains("last 7 hours"));
        assert!(view.message.contains("4.0h"));
    }

    #[test]
    fn broken_streak_message_names_the_limit() {
        let view = build(
            &record(5, 12, Some(40.0)),
            CommentEligibility::Resettable { elapsed_hours: 40.0 },
        );
        assert!(view.message.contains("Streak broken"));
        assert!(view.message.contains("32"));
    }

    #[test]
    fn progress_line_targets_next_badge() {
        let view = build(
            &record(10, 10, Some(10.0)),
            CommentEligibility::Continuable { elapsed_hours: 10.0 },
        );
        assert_eq!(view.tier.label, "Consistent");
        assert_eq!(view.progress_line.as_deref(), Some("10/15 days to Warrior"));
    }

    #[test]
    fn badge_checklist_mixes_locked_and_unlocked() {
        let view = build(
            &record(10, 10, Some(10.0)),
            CommentEligibility::Continuable { elapsed_hours: 10.0 },
        );
        assert_eq!(view.badges.len(), 6);
        let seeker = &view.badges[0];
        assert!(seeker.unlocked);
        assert_eq!(seeker.days_to_go, None);
        let warrior = &view.badges[2];
        assert!(!warrior.unlocked);
        assert_eq!(warrior.days_to_go, Some(5));
    }

    #[test]
    fn terminal_state_has_no_progress_line() {
        let view = build(
            &record(75, 90, Some(10.0)),
            CommentEligibility::Continuable { elapsed_hours: 10.0 },
        );
        assert!(view.progress_line.is_none());
        assert!(view.tier.all_unlocked);
        assert!(view.badges.iter().all(|badge| badge.unlocked));
    }

    #[test]
    fn view_serializes_to_json() {
        let view = build(&record(0, 0, None), CommentEligibility::NoPriorActivity);
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"no_prior_activity\""));
        assert!(json.contains("\"New Member\""));
    }
}
