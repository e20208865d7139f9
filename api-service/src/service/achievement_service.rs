use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{PlayerName, Result};

use crate::domain::catalog::{self, AchievementDef, UnlockCriteria};
use crate::repository::{AchievementRepository, ScoreRepository};

/// A catalog entry annotated with one player's unlock state.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementStatus {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub enum UnlockOutcome {
    /// The unlock row was created. Carries the catalog definition, or
    /// None when the id is not in the catalog (informational, not an
    /// error).
    Unlocked(Option<&'static AchievementDef>),
    AlreadyUnlocked,
}

pub struct AchievementService {
    achievement_repo: AchievementRepository,
    score_repo: ScoreRepository,
}

impl AchievementService {
    pub fn new(achievement_repo: AchievementRepository, score_repo: ScoreRepository) -> Self {
        Self {
            achievement_repo,
            score_repo,
        }
    }

    /// Decide which achievements a just-finished run newly earns and
    /// persist one unlock row each. A definition only appears in the
    /// result if its row was actually inserted, so concurrent
    /// evaluations for the same player agree on a single winner.
    #[tracing::instrument(skip(self), fields(player_name = %player_name))]
    pub async fn evaluate(
        &self,
        player_name: &PlayerName,
        height: i32,
        completed: bool,
        completion_time: Option<i32>,
    ) -> Result<Vec<&'static AchievementDef>> {
        let unlocked = self.achievement_repo.unlocked_ids(player_name).await?;

        let mut candidates: Vec<&'static AchievementDef> = Vec::new();

        for def in catalog::achievements_for_height(height) {
            if !unlocked.contains(def.id) {
                candidates.push(def);
            }
        }

        if completed {
            let completions = self.score_repo.count_completed_by_player(player_name).await?;
            for def in catalog::completion_achievements() {
                if unlocked.contains(def.id) {
                    continue;
                }
                if completion_criteria_met(&def.unlock_criteria, completion_time, completions) {
                    candidates.push(def);
                }
            }
        }

        let games_played = self.score_repo.count_by_player(player_name).await?;
        for def in catalog::CATALOG {
            if let UnlockCriteria::GamesPlayed { min } = def.unlock_criteria {
                if !unlocked.contains(def.id) && games_played >= min {
                    candidates.push(def);
                }
            }
        }

        // each definition id at most once, even if matched redundantly
        let mut seen = HashSet::new();
        candidates.retain(|def| seen.insert(def.id));

        let mut newly_unlocked = Vec::new();
        for def in candidates {
            if self
                .achievement_repo
                .insert_if_absent(player_name, def.id)
                .await?
            {
                newly_unlocked.push(def);
            }
        }

        if !newly_unlocked.is_empty() {
            shared::record_counter(
                "api_service.achievements.unlocked",
                newly_unlocked.len() as u64,
            );
            tracing::info!(
                unlocked = ?newly_unlocked.iter().map(|d| d.id).collect::<Vec<_>>(),
                "Achievements unlocked"
            );
        }

        Ok(newly_unlocked)
    }

    /// Evaluation wrapper for the score-save path: a saved score is
    /// never failed by achievement bookkeeping, so any error here is
    /// reported and swallowed.
    pub async fn evaluate_best_effort(
        &self,
        player_name: &PlayerName,
        height: i32,
        completed: bool,
        completion_time: Option<i32>,
    ) -> Vec<&'static AchievementDef> {
        match self
            .evaluate(player_name, height, completed, completion_time)
            .await
        {
            Ok(newly_unlocked) => newly_unlocked,
            Err(e) => {
                shared::record_counter("api_service.achievements.evaluation_failures", 1);
                tracing::error!(
                    error = %e,
                    player = %player_name,
                    "Achievement evaluation failed, score save unaffected"
                );
                Vec::new()
            }
        }
    }

    /// Manual unlock, bypassing criteria evaluation.
    pub async fn unlock(
        &self,
        player_name: &PlayerName,
        achievement_id: &str,
    ) -> Result<UnlockOutcome> {
        if self
            .achievement_repo
            .insert_if_absent(player_name, achievement_id)
            .await?
        {
            tracing::info!(
                player = %player_name,
                achievement_id = achievement_id,
                "Achievement unlocked manually"
            );
            Ok(UnlockOutcome::Unlocked(catalog::find(achievement_id)))
        } else {
            Ok(UnlockOutcome::AlreadyUnlocked)
        }
    }

    /// The full catalog annotated with this player's unlock status.
    pub async fn achievements_with_status(
        &self,
        player_name: &PlayerName,
    ) -> Result<Vec<AchievementStatus>> {
        let unlocks = self.achievement_repo.unlocks_for_player(player_name).await?;
        let unlocked_at: HashMap<&str, DateTime<Utc>> = unlocks
            .iter()
            .map(|u| (u.achievement_id.as_str(), u.unlocked_at))
            .collect();

        let statuses = catalog::CATALOG
            .iter()
            .map(|def| AchievementStatus {
                id: def.id,
                name: def.name,
                description: def.description,
                icon: def.icon,
                unlocked: unlocked_at.contains_key(def.id),
                unlocked_at: unlocked_at.get(def.id).copied(),
            })
            .collect();

        Ok(statuses)
    }
}

/// Completion-family criteria check for a finished run. A missing
/// completion time simply fails the time criteria rather than erroring.
fn completion_criteria_met(
    criteria: &UnlockCriteria,
    completion_time: Option<i32>,
    completions: i64,
) -> bool {
    match criteria {
        UnlockCriteria::Completion => true,
        UnlockCriteria::CompletionTime { max_secs } => {
            completion_time.is_some_and(|secs| secs <= *max_secs)
        }
        UnlockCriteria::Completions { min } => completions >= *min,
        UnlockCriteria::Height { .. } | UnlockCriteria::GamesPlayed { .. } => false,
    }
}
