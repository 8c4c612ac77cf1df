//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Identity-scoped queries
//! take a `mate_core::identity::Identity` and bind its
//! `(user_id, session_token)` column pair once.

pub mod action_repo;
pub mod badge_repo;
pub mod chat_repo;
pub mod curriculum_repo;
pub mod goal_repo;
pub mod growth_log_repo;
pub mod onboarding_repo;
pub mod progress_repo;
pub mod session_repo;
pub mod stats_repo;
pub mod streak_repo;
pub mod subscription_repo;
pub mod user_repo;

pub use action_repo::ActionRepo;
pub use badge_repo::BadgeRepo;
pub use chat_repo::ChatRepo;
pub use curriculum_repo::CurriculumRepo;
pub use goal_repo::GoalRepo;
pub use growth_log_repo::GrowthLogRepo;
pub use onboarding_repo::OnboardingRepo;
pub use progress_repo::ProgressRepo;
pub use session_repo::SessionRepo;
pub use stats_repo::StatsRepo;
pub use streak_repo::StreakRepo;
pub use subscription_repo::SubscriptionRepo;
pub use user_repo::UserRepo;
