//! Parsing of the curriculum generation reply.
//!
//! The reply must be a JSON object matching [`CurriculumPlan`] with the
//! fixed cardinality the system prompt requests. Any deviation collapses
//! into a single [`CoreError::GenerationParse`]; the caller discards the
//! reply and retries the whole generation call.

use mate_core::error::CoreError;
use serde::Deserialize;

use crate::prompt::{CURRICULUM_WEEKS, ITEMS_PER_WEEK};

/// Parsed curriculum plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurriculumPlan {
    pub weeks: Vec<CurriculumWeek>,
}

/// One week of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurriculumWeek {
    pub week: i32,
    pub theme: String,
    pub items: Vec<CurriculumItem>,
}

/// One content item within a week.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurriculumItem {
    pub title: String,
    pub summary: String,
    pub kind: String,
}

const VALID_KINDS: &[&str] = &["article", "exercise", "checklist"];

/// Parse a completion string into a [`CurriculumPlan`].
pub fn parse_curriculum(reply: &str) -> Result<CurriculumPlan, CoreError> {
    let body = strip_fences(reply);

    let plan: CurriculumPlan = serde_json::from_str(body)
        .map_err(|e| CoreError::GenerationParse(format!("invalid JSON: {e}")))?;

    if plan.weeks.len() != CURRICULUM_WEEKS {
        return Err(CoreError::GenerationParse(format!(
            "expected {CURRICULUM_WEEKS} weeks, got {}",
            plan.weeks.len()
        )));
    }

    for (index, week) in plan.weeks.iter().enumerate() {
        let expected = index as i32 + 1;
        if week.week != expected {
            return Err(CoreError::GenerationParse(format!(
                "week {expected} is labelled {}",
                week.week
            )));
        }
        if week.items.len() != ITEMS_PER_WEEK {
            return Err(CoreError::GenerationParse(format!(
                "week {expected} has {} items, expected {ITEMS_PER_WEEK}",
                week.items.len()
            )));
        }
        if week.theme.trim().is_empty() {
            return Err(CoreError::GenerationParse(format!(
                "week {expected} has an empty theme"
            )));
        }
        for item in &week.items {
            if item.title.trim().is_empty() {
                return Err(CoreError::GenerationParse(format!(
                    "week {expected} has an item with an empty title"
                )));
            }
            if !VALID_KINDS.contains(&item.kind.as_str()) {
                return Err(CoreError::GenerationParse(format!(
                    "unknown content kind '{}'",
                    item.kind
                )));
            }
        }
    }

    Ok(plan)
}

/// Strip a surrounding markdown code fence, if the model added one despite
/// instructions.
fn strip_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid_reply() -> String {
        let week = |n: i32| {
            format!(
                r#"{{"week": {n}, "theme": "Theme {n}", "items": [
                    {{"title": "A", "summary": "a", "kind": "article"}},
                    {{"title": "B", "summary": "b", "kind": "exercise"}},
                    {{"title": "C", "summary": "c", "kind": "checklist"}}
                ]}}"#
            )
        };
        format!(
            r#"{{"weeks": [{}, {}, {}, {}]}}"#,
            week(1),
            week(2),
            week(3),
            week(4)
        )
    }

    #[test]
    fn accepts_well_formed_reply() {
        let plan = parse_curriculum(&valid_reply()).unwrap();
        assert_eq!(plan.weeks.len(), 4);
        assert_eq!(plan.weeks[0].theme, "Theme 1");
        assert_eq!(plan.weeks[3].items.len(), 3);
    }

    #[test]
    fn accepts_fenced_reply() {
        let fenced = format!("```json\n{}\n```", valid_reply());
        assert!(parse_curriculum(&fenced).is_ok());
        let fenced_plain = format!("```\n{}\n```", valid_reply());
        assert!(parse_curriculum(&fenced_plain).is_ok());
    }

    #[test]
    fn rejects_non_json() {
        assert_matches!(
            parse_curriculum("here is your curriculum!"),
            Err(CoreError::GenerationParse(_))
        );
    }

    #[test]
    fn rejects_wrong_week_count() {
        let reply = r#"{"weeks": [{"week": 1, "theme": "T", "items": [
            {"title": "A", "summary": "a", "kind": "article"},
            {"title": "B", "summary": "b", "kind": "article"},
            {"title": "C", "summary": "c", "kind": "article"}
        ]}]}"#;
        assert_matches!(parse_curriculum(reply), Err(CoreError::GenerationParse(_)));
    }

    #[test]
    fn rejects_wrong_item_count() {
        let mut reply = valid_reply();
        // Drop one item from week 1.
        reply = reply.replacen(
            r#"{"title": "A", "summary": "a", "kind": "article"},"#,
            "",
            1,
        );
        assert_matches!(parse_curriculum(&reply), Err(CoreError::GenerationParse(_)));
    }

    #[test]
    fn rejects_mislabelled_weeks() {
        let reply = valid_reply().replacen(r#""week": 2"#, r#""week": 7"#, 1);
        assert_matches!(parse_curriculum(&reply), Err(CoreError::GenerationParse(_)));
    }

    #[test]
    fn rejects_unknown_kind() {
        let reply = valid_reply().replacen("article", "podcast", 1);
        assert_matches!(parse_curriculum(&reply), Err(CoreError::GenerationParse(_)));
    }

    #[test]
    fn rejects_missing_fields() {
        let reply = valid_reply().replacen(r#""summary": "a","#, "", 1);
        assert_matches!(parse_curriculum(&reply), Err(CoreError::GenerationParse(_)));
    }
}
