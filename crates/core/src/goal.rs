//! Weekly goal evaluation: completed-vs-target content items per ISO week.

use serde::Serialize;

/// Default weekly target for lazily-created goals.
pub const DEFAULT_WEEKLY_TARGET: i32 = 5;

/// Evaluated weekly goal progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    /// Progress percentage, clamped to 0..=100.
    pub percent: i32,
    /// Whether the target has been reached.
    pub achieved: bool,
}

/// Evaluate weekly goal progress from the two counts.
///
/// `percent = round(100 * completed / target)` clamped to `[0, 100]`.
/// A non-positive target yields 0 percent and not-achieved rather than a
/// division error. Recomputable at any time; no hidden state.
pub fn evaluate(target_count: i32, completed_count: i32) -> GoalProgress {
    if target_count <= 0 {
        return GoalProgress {
            percent: 0,
            achieved: false,
        };
    }

    let completed = completed_count.max(0);
    let percent = ((completed as f64 / target_count as f64) * 100.0).round() as i32;

    GoalProgress {
        percent: percent.clamp(0, 100),
        achieved: completed >= target_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_progress() {
        let progress = evaluate(5, 3);
        assert_eq!(progress.percent, 60);
        assert!(!progress.achieved);
    }

    #[test]
    fn target_reached() {
        let progress = evaluate(5, 5);
        assert_eq!(progress.percent, 100);
        assert!(progress.achieved);
    }

    #[test]
    fn overshoot_is_clamped() {
        let progress = evaluate(5, 12);
        assert_eq!(progress.percent, 100);
        assert!(progress.achieved);
    }

    #[test]
    fn zero_target_has_no_division_error() {
        let progress = evaluate(0, 3);
        assert_eq!(progress.percent, 0);
        assert!(!progress.achieved);
    }

    #[test]
    fn negative_target_treated_like_zero() {
        assert_eq!(evaluate(-2, 3), evaluate(0, 3));
    }

    #[test]
    fn negative_completed_is_clamped() {
        let progress = evaluate(5, -1);
        assert_eq!(progress.percent, 0);
        assert!(!progress.achieved);
    }

    #[test]
    fn rounds_to_nearest_percent() {
        assert_eq!(evaluate(3, 1).percent, 33);
        assert_eq!(evaluate(3, 2).percent, 67);
    }

    #[test]
    fn idempotent_for_same_input() {
        assert_eq!(evaluate(5, 3), evaluate(5, 3));
    }
}
