//! Tier/badge ladder and progress lookup.
//!
//! The ladder is an injectable ordered list of `(threshold_days, label)`
//! pairs rather than a hard-coded table, so alternative reward schemes are
//! a configuration choice. A streak exactly equal to a threshold has
//! reached that tier. The ladder terminates: past the top threshold the
//! status reports every badge unlocked and no further target.

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Label used before the first threshold is reached.
pub const BASELINE_LABEL: &str = "New Member";

/// One rung of the ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Streak days required to unlock this tier
    pub threshold: u32,
    /// Badge label
    pub label: String,
}

/// Ordered ladder of tiers with strictly increasing thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Build a table, validating that thresholds are strictly increasing
    /// and the table is non-empty.
    ///
    /// # Errors
    /// Returns [`DataError::InvalidTierTable`] on an empty table or any
    /// non-increasing pair.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, DataError> {
        if tiers.is_empty() {
            return Err(DataError::InvalidTierTable("table is empty".to_string()));
        }
        for pair in tiers.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(DataError::InvalidTierTable(format!(
                    "thresholds must be strictly increasing ({} then {})",
                    pair[0].threshold, pair[1].threshold
                )));
            }
        }
        Ok(Self { tiers })
    }

    /// Convenience constructor from `(threshold, label)` pairs.
    pub fn from_pairs(pairs: &[(u32, &str)]) -> Result<Self, DataError> {
        Self::new(
            pairs
                .iter()
                .map(|(threshold, label)| Tier {
                    threshold: *threshold,
                    label: (*label).to_string(),
                })
                .collect(),
        )
    }

    /// The tiers, ascending by threshold.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Map a streak to its current tier, next target and progress.
    pub fn tier_for(&self, streak: u32) -> TierStatus {
        let current = self
            .tiers
            .iter()
            .rev()
            .find(|tier| streak >= tier.threshold);
        let next = self.tiers.iter().find(|tier| tier.threshold > streak);

        let label = current
            .map(|tier| tier.label.clone())
            .unwrap_or_else(|| BASELINE_LABEL.to_string());

        match next {
            Some(tier) => TierStatus {
                label,
                next: Some(tier.clone()),
                progress: (streak as f64 / tier.threshold as f64).clamp(0.0, 1.0),
                all_unlocked: false,
            },
            None => TierStatus {
                label,
                next: None,
                progress: 1.0,
                all_unlocked: true,
            },
        }
    }
}

impl Default for TierTable {
    /// The canonical milestone ladder.
    fn default() -> Self {
        Self::from_pairs(&[
            (1, "Seeker"),
            (5, "Consistent"),
            (15, "Warrior"),
            (30, "Devotee"),
            (45, "Light Bearer"),
            (60, "Acharya"),
        ])
        .expect("canonical ladder is valid")
    }
}

impl TryFrom<Vec<Tier>> for TierTable {
    type Error = DataError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierTable> for Vec<Tier> {
    fn from(table: TierTable) -> Self {
        table.tiers
    }
}

/// Result of a tier lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierStatus {
    /// Label of the highest tier reached, or the baseline label
    pub label: String,
    /// The next tier to unlock, absent once the ladder is complete
    pub next: Option<Tier>,
    /// `streak / next.threshold` clamped to [0, 1]; 1.0 when complete
    pub progress: f64,
    /// Whether every badge on the ladder is unlocked
    pub all_unlocked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_table() -> TierTable {
        TierTable::from_pairs(&[
            (1, "Bronze"),
            (7, "Silver"),
            (21, "Gold"),
            (45, "Platinum"),
            (90, "Diamond"),
        ])
        .unwrap()
    }

    #[test]
    fn zero_streak_is_baseline() {
        let status = spec_table().tier_for(0);
        assert_eq!(status.label, BASELINE_LABEL);
        assert_eq!(status.next.as_ref().unwrap().threshold, 1);
        assert_eq!(status.progress, 0.0);
        assert!(!status.all_unlocked);
    }

    #[test]
    fn exact_threshold_reaches_tier() {
        let status = spec_table().tier_for(21);
        assert_eq!(status.label, "Gold");
        let next = status.next.unwrap();
        assert_eq!(next.threshold, 45);
        assert!((status.progress - 21.0 / 45.0).abs() < 1e-9);
    }

    #[test]
    fn between_thresholds_keeps_lower_tier() {
        let status = spec_table().tier_for(10);
        assert_eq!(status.label, "Silver");
        assert_eq!(status.next.unwrap().threshold, 21);
    }

    #[test]
    fn past_top_threshold_is_terminal() {
        let status = spec_table().tier_for(120);
        assert_eq!(status.label, "Diamond");
        assert!(status.next.is_none());
        assert_eq!(status.progress, 1.0);
        assert!(status.all_unlocked);
    }

    #[test]
    fn top_threshold_exactly_is_terminal() {
        let status = spec_table().tier_for(90);
        assert_eq!(status.label, "Diamond");
        assert!(status.all_unlocked);
    }

    #[test]
    fn canonical_ladder_labels() {
        let table = TierTable::default();
        assert_eq!(table.tier_for(1).label, "Seeker");
        assert_eq!(table.tier_for(59).label, "Light Bearer");
        assert_eq!(table.tier_for(60).label, "Acharya");
    }

    #[test]
    fn rejects_non_increasing_thresholds() {
        let err = TierTable::from_pairs(&[(5, "A"), (5, "B")]).unwrap_err();
        assert!(matches!(err, DataError::InvalidTierTable(_)));
        let err = TierTable::from_pairs(&[(10, "A"), (3, "B")]).unwrap_err();
        assert!(matches!(err, DataError::InvalidTierTable(_)));
    }

    #[test]
    fn rejects_empty_table() {
        assert!(TierTable::new(Vec::new()).is_err());
    }
}
