use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, ServiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreId(pub Uuid);

impl ScoreId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(ScoreId)
            .map_err(|e| ServiceError::Validation(format!("Invalid score ID: {}", e)))
    }
}

impl Default for ScoreId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ScoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(SessionId)
            .map_err(|e| ServiceError::Validation(format!("Invalid session ID: {}", e)))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player identity key for scores, the leaderboard, and achievements.
/// Free-form display text, but never empty and bounded in length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    const MAX_LENGTH: usize = 50;

    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        Self::validate(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    fn validate(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ServiceError::InvalidPlayerName(
                "Player name must not be empty".to_string(),
            ));
        }

        if name.len() > Self::MAX_LENGTH {
            return Err(ServiceError::InvalidPlayerName(format!(
                "Player name must be at most {} characters",
                Self::MAX_LENGTH
            )));
        }

        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One finished run. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: ScoreId,
    pub player_name: PlayerName,
    pub height: i32,
    pub completed: bool,
    pub completion_time: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub player_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub final_height: i32,
    pub completed: bool,
    pub play_time: i32,
}

/// A granted achievement. The (player_name, achievement_id) pair is
/// unique; rows are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub id: Uuid,
    pub player_name: String,
    pub achievement_id: String,
    pub unlocked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub height: i32,
    pub completions: i64,
    pub best_time: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStats {
    pub total_plays: i64,
    pub average_height: f64,
    pub completion_rate: f64,
    pub total_play_time: String,
}
