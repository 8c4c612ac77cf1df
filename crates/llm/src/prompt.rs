//! Prompt templates for curriculum generation and chat coaching.
//!
//! Rendering is deterministic: the same profile always produces the same
//! instruction string, so a failed generation can be retried verbatim.

use mate_core::onboarding::FounderProfile;

/// Number of weeks a generated curriculum spans.
pub const CURRICULUM_WEEKS: usize = 4;

/// Number of content items per week.
pub const ITEMS_PER_WEEK: usize = 3;

/// System prompt fixing the response shape for curriculum generation.
pub const CURRICULUM_SYSTEM_PROMPT: &str = "\
You are MATE, a learning coach for early-stage startup founders. \
Reply with a single JSON object and nothing else. The object must have a \
\"weeks\" array of exactly 4 entries; each entry has \"week\" (1-4), \
\"theme\" (string), and \"items\": an array of exactly 3 objects with \
\"title\", \"summary\", and \"kind\" (one of \"article\", \"exercise\", \
\"checklist\"). Do not wrap the JSON in markdown fences.";

/// System prompt for the chat coaching endpoint.
pub const CHAT_SYSTEM_PROMPT: &str = "\
You are MATE, a pragmatic coach for early-stage startup founders. Answer \
concretely, reference the founder's own context when given, and keep \
replies under 200 words.";

/// Input to the curriculum prompt builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurriculumRequest {
    pub user_name: String,
    pub industry: String,
    pub stage: String,
    pub concerns: Vec<String>,
    pub goal: String,
}

impl From<FounderProfile> for CurriculumRequest {
    fn from(profile: FounderProfile) -> Self {
        Self {
            user_name: profile.user_name,
            industry: profile.industry,
            stage: profile.stage,
            concerns: profile.concerns,
            goal: profile.goal,
        }
    }
}

/// Render the user prompt for a curriculum generation call.
pub fn curriculum_prompt(request: &CurriculumRequest) -> String {
    let concerns = if request.concerns.is_empty() {
        "(none given)".to_string()
    } else {
        request.concerns.join("; ")
    };

    format!(
        "Build a {CURRICULUM_WEEKS}-week learning curriculum \
         ({ITEMS_PER_WEEK} items per week) for this founder:\n\
         - Name: {name}\n\
         - Industry: {industry}\n\
         - Stage: {stage}\n\
         - Main concerns: {concerns}\n\
         - Goal: {goal}\n\
         Order the weeks so the curriculum moves from the founder's most \
         pressing concern towards the stated goal.",
        name = request.user_name,
        industry = request.industry,
        stage = request.stage,
        goal = request.goal,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CurriculumRequest {
        CurriculumRequest {
            user_name: "Ada".to_string(),
            industry: "fintech".to_string(),
            stage: "pre-seed".to_string(),
            concerns: vec!["pricing".to_string(), "first users".to_string()],
            goal: "launch an MVP".to_string(),
        }
    }

    #[test]
    fn prompt_embeds_every_profile_field() {
        let prompt = curriculum_prompt(&request());
        assert!(prompt.contains("Ada"));
        assert!(prompt.contains("fintech"));
        assert!(prompt.contains("pre-seed"));
        assert!(prompt.contains("pricing; first users"));
        assert!(prompt.contains("launch an MVP"));
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(curriculum_prompt(&request()), curriculum_prompt(&request()));
    }

    #[test]
    fn empty_concerns_render_placeholder() {
        let mut req = request();
        req.concerns.clear();
        assert!(curriculum_prompt(&req).contains("(none given)"));
    }

    #[test]
    fn system_prompt_states_cardinality() {
        assert!(CURRICULUM_SYSTEM_PROMPT.contains("exactly 4"));
        assert!(CURRICULUM_SYSTEM_PROMPT.contains("exactly 3"));
    }
}
