//! Achievement evaluation: fixed unlock thresholds over aggregate stats.
//!
//! The catalog is declared once; unlock state is derived from a stat
//! snapshot on every read. Only the moment of unlock is persisted (the
//! `earned_badges` join table), for display history.

use serde::Serialize;

use crate::types::DbId;

/// Which aggregate stat an achievement watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    ProblemsCompleted,
    StepsCompleted,
    ChecklistsCompleted,
    CurrentStreak,
    TotalXp,
}

/// A snapshot of one identity's aggregate stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatSnapshot {
    pub problems_completed: i64,
    pub steps_completed: i64,
    pub checklists_completed: i64,
    pub current_streak: i64,
    pub total_xp: i64,
}

impl StatSnapshot {
    /// The value of the watched stat.
    pub fn get(&self, kind: StatKind) -> i64 {
        match kind {
            StatKind::ProblemsCompleted => self.problems_completed,
            StatKind::StepsCompleted => self.steps_completed,
            StatKind::ChecklistsCompleted => self.checklists_completed,
            StatKind::CurrentStreak => self.current_streak,
            StatKind::TotalXp => self.total_xp,
        }
    }
}

/// One achievement definition from the fixed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementDef {
    /// Catalog id, matching the `badges` table.
    pub id: DbId,
    pub name: &'static str,
    pub description: &'static str,
    /// The stat this achievement watches.
    pub stat: StatKind,
    /// Unlock threshold for the watched stat.
    pub target: i64,
}

/// Display state of a single achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockState {
    Unlocked,
    InProgress,
    Locked,
}

/// Progress towards a not-yet-unlocked achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementProgress {
    pub current: i64,
    pub target: i64,
}

/// One evaluated achievement, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluatedAchievement {
    pub id: DbId,
    pub name: &'static str,
    pub description: &'static str,
    pub state: UnlockState,
    /// Present only while in progress (`0 < stat < target`).
    pub progress: Option<AchievementProgress>,
    /// Whether the unlock was already recorded in the earned table.
    pub previously_earned: bool,
}

/// Fixed achievement catalog. Declaration order is the display tiebreak.
pub const CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: 1,
        name: "First Step",
        description: "Complete your first content item",
        stat: StatKind::StepsCompleted,
        target: 1,
    },
    AchievementDef {
        id: 2,
        name: "Problem Solver",
        description: "Work through 5 founder problems",
        stat: StatKind::ProblemsCompleted,
        target: 5,
    },
    AchievementDef {
        id: 3,
        name: "Checklist Champion",
        description: "Finish 10 checklists",
        stat: StatKind::ChecklistsCompleted,
        target: 10,
    },
    AchievementDef {
        id: 4,
        name: "Week One",
        description: "Keep a 7-day streak",
        stat: StatKind::CurrentStreak,
        target: 7,
    },
    AchievementDef {
        id: 5,
        name: "Momentum",
        description: "Keep a 30-day streak",
        stat: StatKind::CurrentStreak,
        target: 30,
    },
    AchievementDef {
        id: 6,
        name: "Rising Founder",
        description: "Earn 1000 XP",
        stat: StatKind::TotalXp,
        target: 1000,
    },
    AchievementDef {
        id: 7,
        name: "Seasoned Founder",
        description: "Earn 5000 XP",
        stat: StatKind::TotalXp,
        target: 5000,
    },
];

/// Evaluate a catalog against a stat snapshot.
///
/// For each definition: `unlocked = stat >= target`; a stat strictly
/// between zero and the target yields a progress entry; a zero stat yields
/// none. Output is ordered unlocked, then in-progress, then locked, with
/// catalog declaration order as the tiebreak (stable sort).
pub fn evaluate(
    catalog: &[AchievementDef],
    snapshot: &StatSnapshot,
    earned_ids: &[DbId],
) -> Vec<EvaluatedAchievement> {
    let mut evaluated: Vec<EvaluatedAchievement> = catalog
        .iter()
        .map(|def| {
            let stat = snapshot.get(def.stat);
            let state = if stat >= def.target {
                UnlockState::Unlocked
            } else if stat > 0 {
                UnlockState::InProgress
            } else {
                UnlockState::Locked
            };
            let progress = match state {
                UnlockState::InProgress => Some(AchievementProgress {
                    current: stat,
                    target: def.target,
                }),
                UnlockState::Unlocked | UnlockState::Locked => None,
            };
            EvaluatedAchievement {
                id: def.id,
                name: def.name,
                description: def.description,
                state,
                progress,
                previously_earned: earned_ids.contains(&def.id),
            }
        })
        .collect();

    evaluated.sort_by_key(|a| match a.state {
        UnlockState::Unlocked => 0,
        UnlockState::InProgress => 1,
        UnlockState::Locked => 2,
    });
    evaluated
}

/// Ids of achievements that are unlocked but not yet recorded as earned.
pub fn newly_earned(evaluated: &[EvaluatedAchievement]) -> Vec<DbId> {
    evaluated
        .iter()
        .filter(|a| a.state == UnlockState::Unlocked && !a.previously_earned)
        .map(|a| a.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<AchievementDef> {
        vec![
            AchievementDef {
                id: 1,
                name: "A",
                description: "",
                stat: StatKind::StepsCompleted,
                target: 10,
            },
            AchievementDef {
                id: 2,
                name: "B",
                description: "",
                stat: StatKind::ProblemsCompleted,
                target: 3,
            },
            AchievementDef {
                id: 3,
                name: "C",
                description: "",
                stat: StatKind::TotalXp,
                target: 100,
            },
        ]
    }

    #[test]
    fn zero_stat_is_locked_without_progress() {
        let out = evaluate(&catalog(), &StatSnapshot::default(), &[]);
        assert!(out.iter().all(|a| a.state == UnlockState::Locked));
        assert!(out.iter().all(|a| a.progress.is_none()));
    }

    #[test]
    fn partial_stat_yields_progress() {
        let snapshot = StatSnapshot {
            steps_completed: 4,
            ..Default::default()
        };
        let out = evaluate(&catalog(), &snapshot, &[]);
        let a = out.iter().find(|a| a.id == 1).unwrap();
        assert_eq!(a.state, UnlockState::InProgress);
        assert_eq!(
            a.progress,
            Some(AchievementProgress {
                current: 4,
                target: 10
            })
        );
    }

    #[test]
    fn reaching_target_unlocks_without_progress() {
        let snapshot = StatSnapshot {
            problems_completed: 3,
            ..Default::default()
        };
        let out = evaluate(&catalog(), &snapshot, &[]);
        let b = out.iter().find(|a| a.id == 2).unwrap();
        assert_eq!(b.state, UnlockState::Unlocked);
        assert_eq!(b.progress, None);
    }

    #[test]
    fn display_order_unlocked_then_in_progress_then_locked() {
        let snapshot = StatSnapshot {
            steps_completed: 4,   // in progress (id 1)
            problems_completed: 3, // unlocked (id 2)
            total_xp: 0,           // locked (id 3)
            ..Default::default()
        };
        let out = evaluate(&catalog(), &snapshot, &[]);
        let ids: Vec<DbId> = out.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn ties_keep_catalog_declaration_order() {
        let snapshot = StatSnapshot {
            steps_completed: 10,
            problems_completed: 3,
            total_xp: 100,
            ..Default::default()
        };
        let out = evaluate(&catalog(), &snapshot, &[]);
        // All unlocked: order must be declaration order.
        let ids: Vec<DbId> = out.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn newly_earned_excludes_already_recorded() {
        let snapshot = StatSnapshot {
            steps_completed: 10,
            problems_completed: 3,
            ..Default::default()
        };
        let out = evaluate(&catalog(), &snapshot, &[1]);
        assert_eq!(newly_earned(&out), vec![2]);
    }

    #[test]
    fn builtin_catalog_ids_are_unique() {
        let mut ids: Vec<DbId> = CATALOG.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CATALOG.len());
    }
}
