//! Client, prompt templates, and reply parsing for the external
//! text-generation API.

pub mod client;
pub mod parse;
pub mod prompt;

pub use client::{ChatTurn, LlmApi, LlmApiError, LlmConfig};
pub use parse::{parse_curriculum, CurriculumItem, CurriculumPlan, CurriculumWeek};
pub use prompt::{curriculum_prompt, CurriculumRequest, CHAT_SYSTEM_PROMPT, CURRICULUM_SYSTEM_PROMPT};
