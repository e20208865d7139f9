use std::sync::Arc;

use api_service::repository::{AchievementRepository, ScoreRepository, SessionRepository};
use api_service::service::{AchievementService, ScoreService, SessionService};
use shared::PlayerName;
use sqlx::PgPool;

pub fn player(name: &str) -> PlayerName {
    PlayerName::new(name).expect("valid test player name")
}

pub struct TestServices {
    pub score_service: Arc<ScoreService>,
    pub session_service: Arc<SessionService>,
    pub achievement_service: Arc<AchievementService>,
}

/// Wire the full service stack against a test pool, the same way main
/// does at startup.
pub fn build_services(pool: PgPool) -> TestServices {
    let score_repo = ScoreRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let achievement_repo = AchievementRepository::new(pool);

    let achievement_service = Arc::new(AchievementService::new(
        achievement_repo,
        score_repo.clone(),
    ));
    let score_service = Arc::new(ScoreService::new(score_repo, achievement_service.clone()));
    let session_service = Arc::new(SessionService::new(session_repo));

    TestServices {
        score_service,
        session_service,
        achievement_service,
    }
}
