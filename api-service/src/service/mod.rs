pub mod achievement_service;
pub mod score_service;
pub mod session_service;

pub use achievement_service::{AchievementService, AchievementStatus, UnlockOutcome};
pub use score_service::{SavedScore, ScoreService};
pub use session_service::SessionService;
