use shared::{LeaderboardEntry, PlayerName, Result, ScoreId, ScoreRecord};
use sqlx::{PgPool, Row};

/// Global aggregates over all score rows. An empty table yields zero
/// plays and a NULL average.
#[derive(Debug, Clone)]
pub struct ScoreTotals {
    pub total_plays: i64,
    pub average_height: Option<f64>,
    pub completions: i64,
}

#[derive(Clone)]
pub struct ScoreRepository {
    pool: PgPool,
}

impl ScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        player_name: &PlayerName,
        height: i32,
        completed: bool,
        completion_time: Option<i32>,
    ) -> Result<ScoreRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO scores (player_name, height, completed, completion_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id, player_name, height, completed, completion_time, created_at
            "#,
        )
        .bind(player_name.as_str())
        .bind(height)
        .bind(completed)
        .bind(completion_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(ScoreRecord {
            id: ScoreId(row.get("id")),
            player_name: PlayerName::new(row.get::<String, _>("player_name"))?,
            height: row.get("height"),
            completed: row.get("completed"),
            completion_time: row.get("completion_time"),
            created_at: row.get("created_at"),
        })
    }

    /// The player's best height over all runs, None with no history.
    pub async fn best_height(&self, player_name: &PlayerName) -> Result<Option<i32>> {
        let row = sqlx::query(
            r#"
            SELECT MAX(height) as best_height
            FROM scores
            WHERE player_name = $1
            "#,
        )
        .bind(player_name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("best_height"))
    }

    pub async fn count_by_player(&self, player_name: &PlayerName) -> Result<i64> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) as count
            FROM scores
            WHERE player_name = $1
            "#,
        )
        .bind(player_name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("count"))
    }

    pub async fn count_completed_by_player(&self, player_name: &PlayerName) -> Result<i64> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) as count
            FROM scores
            WHERE player_name = $1 AND completed = TRUE
            "#,
        )
        .bind(player_name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("count"))
    }

    /// One entry per distinct player: best height, completed-run count,
    /// and best completion time among completed runs. Ordered by best
    /// height, completion count breaking ties.
    pub async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT
                player_name,
                MAX(height) as best_height,
                COUNT(*) FILTER (WHERE completed) as completions,
                MIN(completion_time) FILTER (WHERE completed) as best_time,
                (ARRAY_AGG(id ORDER BY created_at))[1] as score_id
            FROM scores
            GROUP BY player_name
            ORDER BY best_height DESC, completions DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|row| LeaderboardEntry {
                id: row.get::<uuid::Uuid, _>("score_id").to_string(),
                name: row.get("player_name"),
                height: row.get("best_height"),
                completions: row.get("completions"),
                best_time: row.get("best_time"),
            })
            .collect();

        Ok(entries)
    }

    pub async fn totals(&self) -> Result<ScoreTotals> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) as total_plays,
                AVG(height)::DOUBLE PRECISION as average_height,
                COUNT(*) FILTER (WHERE completed) as completions
            FROM scores
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(ScoreTotals {
            total_plays: row.get("total_plays"),
            average_height: row.get("average_height"),
            completions: row.get("completions"),
        })
    }
}
