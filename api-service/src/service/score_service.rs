use std::sync::Arc;

use shared::{GameStats, LeaderboardEntry, PlayerName, Result, ScoreId, ServiceError};

use crate::domain::catalog::AchievementDef;
use crate::repository::ScoreRepository;
use crate::service::AchievementService;

/// Assumed seconds per play when estimating total play time.
const PLAY_TIME_ESTIMATE_SECS: i64 = 120;

const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;

#[derive(Debug, Clone)]
pub struct SavedScore {
    pub score_id: ScoreId,
    pub new_record: bool,
    pub new_achievements: Vec<&'static AchievementDef>,
}

pub struct ScoreService {
    score_repo: ScoreRepository,
    achievement_service: Arc<AchievementService>,
}

impl ScoreService {
    pub fn new(score_repo: ScoreRepository, achievement_service: Arc<AchievementService>) -> Self {
        Self {
            score_repo,
            achievement_service,
        }
    }

    /// Persist a run, report whether it beats the player's prior best,
    /// and grant any achievements it earns. Achievement failures never
    /// fail the save.
    #[tracing::instrument(skip(self), fields(player_name = %player_name))]
    pub async fn save_score(
        &self,
        player_name: &PlayerName,
        height: i32,
        completed: bool,
        completion_time: Option<i32>,
    ) -> Result<SavedScore> {
        let start = std::time::Instant::now();
        shared::record_counter("api_service.score.requests", 1);

        if height < 0 {
            return Err(ServiceError::Validation(
                "height must be non-negative".to_string(),
            ));
        }
        if completion_time.is_some_and(|secs| secs <= 0) {
            return Err(ServiceError::Validation(
                "completion_time must be positive".to_string(),
            ));
        }
        // a completion time without a completed run has no meaning
        let completion_time = if completed { completion_time } else { None };

        let prior_best = self.score_repo.best_height(player_name).await?;
        let score = self
            .score_repo
            .insert(player_name, height, completed, completion_time)
            .await?;
        let new_record = prior_best.map_or(true, |best| height > best);

        let new_achievements = self
            .achievement_service
            .evaluate_best_effort(player_name, height, completed, completion_time)
            .await;

        shared::record_timing(
            "api_service.score.save_latency",
            start.elapsed().as_secs_f64(),
        );

        tracing::info!(
            score_id = %score.id,
            new_record = new_record,
            newly_unlocked = new_achievements.len(),
            "Score saved"
        );

        Ok(SavedScore {
            score_id: score.id,
            new_record,
            new_achievements,
        })
    }

    pub async fn leaderboard(&self, limit: Option<i64>) -> Result<Vec<LeaderboardEntry>> {
        let limit = limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT).max(0);
        self.score_repo.leaderboard(limit).await
    }

    pub async fn stats(&self) -> Result<GameStats> {
        let totals = self.score_repo.totals().await?;

        Ok(GameStats {
            total_plays: totals.total_plays,
            average_height: round1(totals.average_height.unwrap_or(0.0)),
            completion_rate: completion_rate(totals.completions, totals.total_plays),
            total_play_time: format_play_time(totals.total_plays * PLAY_TIME_ESTIMATE_SECS),
        })
    }
}

/// Completed plays as a percentage of all plays, one decimal, 0 when
/// nothing has been played yet.
fn completion_rate(completions: i64, total_plays: i64) -> f64 {
    if total_plays == 0 {
        return 0.0;
    }
    round1(completions as f64 / total_plays as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn format_play_time(total_secs: i64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    format!("{}h {}m", hours, minutes)
}
