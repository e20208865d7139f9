use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared::{GameStats, LeaderboardEntry, PlayerName, Result, SessionId};

use crate::service::{
    AchievementService, AchievementStatus, ScoreService, SessionService, UnlockOutcome,
};

#[derive(Clone)]
pub struct AppState {
    pub score_service: Arc<ScoreService>,
    pub session_service: Arc<SessionService>,
    pub achievement_service: Arc<AchievementService>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "message": "Skyclimb API is running" }))
}

#[derive(Debug, Deserialize)]
pub struct SaveScoreRequest {
    pub player_name: String,
    pub height: i32,
    #[serde(default)]
    pub completed: bool,
    pub completion_time: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub success: bool,
    pub score_id: String,
    pub new_record: bool,
}

pub async fn save_score(
    State(state): State<AppState>,
    Json(req): Json<SaveScoreRequest>,
) -> Result<Json<ScoreResponse>> {
    let player_name = PlayerName::new(req.player_name)?;

    let saved = state
        .score_service
        .save_score(&player_name, req.height, req.completed, req.completion_time)
        .await?;

    Ok(Json(ScoreResponse {
        success: true,
        score_id: saved.score_id.to_string(),
        new_record: saved.new_record,
    }))
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}

pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let entries = state.score_service.leaderboard(query.limit).await?;
    Ok(Json(entries))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<GameStats>> {
    let stats = state.score_service.stats().await?;
    Ok(Json(stats))
}

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    #[serde(default)]
    pub player_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
}

pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> Result<Json<StartSessionResponse>> {
    let session = state
        .session_service
        .start_session(req.player_name.as_deref())
        .await?;

    Ok(Json(StartSessionResponse {
        session_id: session.id.to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub height: i32,
    #[serde(default)]
    pub completed: bool,
    pub play_time: i32,
}

pub async fn update_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<UpdateSessionRequest>,
) -> Result<Json<Value>> {
    let session_id = SessionId::from_string(&session_id)?;

    state
        .session_service
        .finish_session(&session_id, req.height, req.completed, req.play_time)
        .await?;

    Ok(Json(json!({ "success": true })))
}

pub async fn player_achievements(
    State(state): State<AppState>,
    Path(player_name): Path<String>,
) -> Result<Json<Vec<AchievementStatus>>> {
    let player_name = PlayerName::new(player_name)?;

    let statuses = state
        .achievement_service
        .achievements_with_status(&player_name)
        .await?;

    Ok(Json(statuses))
}

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    pub achievement_id: String,
    pub player_name: String,
}

pub async fn unlock_achievement(
    State(state): State<AppState>,
    Json(req): Json<UnlockRequest>,
) -> Result<Json<Value>> {
    let player_name = PlayerName::new(req.player_name)?;

    match state
        .achievement_service
        .unlock(&player_name, &req.achievement_id)
        .await?
    {
        UnlockOutcome::Unlocked(def) => Ok(Json(json!({
            "success": true,
            "achievement": def,
        }))),
        UnlockOutcome::AlreadyUnlocked => Ok(Json(json!({
            "success": false,
            "message": "Achievement already unlocked",
        }))),
    }
}
