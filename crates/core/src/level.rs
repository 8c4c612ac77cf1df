//! Level calculator: maps cumulative experience points to a named tier.
//!
//! A tier catalog is an ordered list of `(threshold, name)` pairs with
//! strictly increasing thresholds; a total maps to the highest tier whose
//! threshold is `<= total`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A named level bracket keyed by an experience-point threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTier {
    /// Minimum cumulative XP for this tier.
    pub threshold: i64,
    /// Display name of the tier.
    pub name: String,
}

/// Result of a level lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelStatus {
    /// 1-based index of the current tier within the catalog.
    pub level: usize,
    /// Name of the current tier.
    pub tier: String,
    /// XP threshold of the current tier.
    pub threshold: i64,
    /// Points remaining to the next tier, or `None` at the top tier.
    pub points_to_next: Option<i64>,
    /// Name of the next tier, or `None` at the top tier.
    pub next_tier: Option<String>,
}

/// Default tier catalog for MATE accounts.
pub fn default_tiers() -> Vec<LevelTier> {
    [
        (0, "Seed"),
        (500, "Sprout"),
        (1000, "Sapling"),
        (2000, "Tree"),
        (5000, "Forest"),
    ]
    .into_iter()
    .map(|(threshold, name)| LevelTier {
        threshold,
        name: name.to_string(),
    })
    .collect()
}

/// Map a cumulative XP total to its tier.
///
/// The total is clamped to `>= 0` before lookup, so negative inputs map to
/// the lowest tier rather than erroring. Fails only on a malformed catalog
/// (empty, or thresholds not strictly increasing).
pub fn compute_level(total_xp: i64, tiers: &[LevelTier]) -> Result<LevelStatus, CoreError> {
    validate_tiers(tiers)?;

    let total = total_xp.max(0);
    let index = tiers
        .iter()
        .rposition(|t| t.threshold <= total)
        // First threshold above the total: clamp to the lowest tier.
        .unwrap_or(0);

    let current = &tiers[index];
    let next = tiers.get(index + 1);

    Ok(LevelStatus {
        level: index + 1,
        tier: current.name.clone(),
        threshold: current.threshold,
        points_to_next: next.map(|n| n.threshold - total),
        next_tier: next.map(|n| n.name.clone()),
    })
}

/// Validate that a tier catalog is non-empty with strictly increasing
/// thresholds.
pub fn validate_tiers(tiers: &[LevelTier]) -> Result<(), CoreError> {
    if tiers.is_empty() {
        return Err(CoreError::Validation(
            "Tier catalog must not be empty".to_string(),
        ));
    }
    for pair in tiers.windows(2) {
        if pair[1].threshold <= pair[0].threshold {
            return Err(CoreError::Validation(format!(
                "Tier thresholds must be strictly increasing ('{}' at {} follows '{}' at {})",
                pair[1].name, pair[1].threshold, pair[0].name, pair[0].threshold
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers() -> Vec<LevelTier> {
        [(0, "Seed"), (500, "Sprout"), (1000, "Sapling"), (2000, "Tree")]
            .into_iter()
            .map(|(threshold, name)| LevelTier {
                threshold,
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn maps_total_to_highest_reached_tier() {
        let status = compute_level(1250, &tiers()).unwrap();
        assert_eq!(status.tier, "Sapling");
        assert_eq!(status.level, 3);
        assert_eq!(status.points_to_next, Some(750));
        assert_eq!(status.next_tier.as_deref(), Some("Tree"));
    }

    #[test]
    fn exact_threshold_enters_the_tier() {
        let status = compute_level(500, &tiers()).unwrap();
        assert_eq!(status.tier, "Sprout");
        assert_eq!(status.points_to_next, Some(500));
    }

    #[test]
    fn zero_total_is_lowest_tier() {
        let status = compute_level(0, &tiers()).unwrap();
        assert_eq!(status.tier, "Seed");
        assert_eq!(status.level, 1);
    }

    #[test]
    fn negative_total_is_clamped() {
        let status = compute_level(-50, &tiers()).unwrap();
        assert_eq!(status.tier, "Seed");
        assert_eq!(status.points_to_next, Some(500));
    }

    #[test]
    fn top_tier_has_no_next() {
        let status = compute_level(99_999, &tiers()).unwrap();
        assert_eq!(status.tier, "Tree");
        assert_eq!(status.points_to_next, None);
        assert_eq!(status.next_tier, None);
    }

    #[test]
    fn total_below_first_threshold_maps_to_lowest_tier() {
        let catalog: Vec<LevelTier> = [(100, "Bronze"), (200, "Silver")]
            .into_iter()
            .map(|(threshold, name)| LevelTier {
                threshold,
                name: name.to_string(),
            })
            .collect();
        let status = compute_level(10, &catalog).unwrap();
        assert_eq!(status.tier, "Bronze");
    }

    #[test]
    fn idempotent_for_same_input() {
        let a = compute_level(1250, &tiers()).unwrap();
        let b = compute_level(1250, &tiers()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(compute_level(100, &[]).is_err());
    }

    #[test]
    fn non_increasing_thresholds_rejected() {
        let catalog: Vec<LevelTier> = [(0, "A"), (100, "B"), (100, "C")]
            .into_iter()
            .map(|(threshold, name)| LevelTier {
                threshold,
                name: name.to_string(),
            })
            .collect();
        assert!(compute_level(100, &catalog).is_err());
    }

    #[test]
    fn default_catalog_is_valid() {
        assert!(validate_tiers(&default_tiers()).is_ok());
    }
}
