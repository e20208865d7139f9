use shared::{Result, SessionId, SessionRecord};

use crate::repository::SessionRepository;

pub struct SessionService {
    session_repo: SessionRepository,
}

impl SessionService {
    pub fn new(session_repo: SessionRepository) -> Self {
        Self { session_repo }
    }

    pub async fn start_session(&self, player_name: Option<&str>) -> Result<SessionRecord> {
        let session = self.session_repo.create(player_name).await?;

        tracing::info!(
            session_id = %session.id,
            player = session.player_name.as_deref().unwrap_or("anonymous"),
            "Session started"
        );

        Ok(session)
    }

    pub async fn finish_session(
        &self,
        session_id: &SessionId,
        final_height: i32,
        completed: bool,
        play_time: i32,
    ) -> Result<()> {
        self.session_repo
            .finish(session_id, final_height, completed, play_time)
            .await?;

        tracing::info!(
            session_id = %session_id,
            final_height = final_height,
            completed = completed,
            play_time = play_time,
            "Session finished"
        );

        Ok(())
    }
}
