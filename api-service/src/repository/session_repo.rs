use shared::{Result, ServiceError, SessionId, SessionRecord};
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, player_name: Option<&str>) -> Result<SessionRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO sessions (player_name)
            VALUES ($1)
            RETURNING id, player_name, start_time, end_time, final_height, completed, play_time
            "#,
        )
        .bind(player_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(Self::record_from_row(&row))
    }

    /// Write the final session state and stamp end_time in one update.
    pub async fn finish(
        &self,
        session_id: &SessionId,
        final_height: i32,
        completed: bool,
        play_time: i32,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET final_height = $1, completed = $2, play_time = $3, end_time = NOW()
            WHERE id = $4
            "#,
        )
        .bind(final_height)
        .bind(completed)
        .bind(play_time)
        .bind(session_id.0)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::SessionNotFound(session_id.to_string()));
        }

        Ok(())
    }

    pub async fn get_by_id(&self, session_id: &SessionId) -> Result<SessionRecord> {
        let row = sqlx::query(
            r#"
            SELECT id, player_name, start_time, end_time, final_height, completed, play_time
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(session_id.0)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::SessionNotFound(session_id.to_string()))?;

        Ok(Self::record_from_row(&row))
    }

    fn record_from_row(row: &sqlx::postgres::PgRow) -> SessionRecord {
        SessionRecord {
            id: SessionId(row.get("id")),
            player_name: row.get("player_name"),
            start_time: row.get("start_time"),
            end_time: row.get("end_time"),
            final_height: row.get("final_height"),
            completed: row.get("completed"),
            play_time: row.get("play_time"),
        }
    }
}
