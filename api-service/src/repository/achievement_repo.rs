use std::collections::HashSet;

use shared::{PlayerName, Result, UnlockRecord};
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct AchievementRepository {
    pool: PgPool,
}

impl AchievementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn unlocked_ids(&self, player_name: &PlayerName) -> Result<HashSet<String>> {
        let rows = sqlx::query(
            r#"
            SELECT achievement_id
            FROM player_achievements
            WHERE player_name = $1
            "#,
        )
        .bind(player_name.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.get("achievement_id")).collect())
    }

    pub async fn unlocks_for_player(&self, player_name: &PlayerName) -> Result<Vec<UnlockRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, player_name, achievement_id, unlocked_at
            FROM player_achievements
            WHERE player_name = $1
            "#,
        )
        .bind(player_name.as_str())
        .fetch_all(&self.pool)
        .await?;

        let unlocks = rows
            .into_iter()
            .map(|row| UnlockRecord {
                id: row.get("id"),
                player_name: row.get("player_name"),
                achievement_id: row.get("achievement_id"),
                unlocked_at: row.get("unlocked_at"),
            })
            .collect();

        Ok(unlocks)
    }

    /// Atomic insert-if-absent against the unique (player, achievement)
    /// pair. Returns true iff this call created the row, so a
    /// concurrent duplicate grant resolves to exactly one winner.
    pub async fn insert_if_absent(
        &self,
        player_name: &PlayerName,
        achievement_id: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO player_achievements (player_name, achievement_id)
            VALUES ($1, $2)
            ON CONFLICT (player_name, achievement_id) DO NOTHING
            "#,
        )
        .bind(player_name.as_str())
        .bind(achievement_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
