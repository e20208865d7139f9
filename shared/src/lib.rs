pub mod config;
pub mod errors;
pub mod telemetry;
pub mod types;

pub use config::{DatabaseConfig, ServiceConfig};
pub use errors::{Result, ServiceError};
pub use telemetry::{init_metrics, init_tracing, record_counter, record_timing};
pub use types::{
    GameStats, LeaderboardEntry, PlayerName, ScoreId, ScoreRecord, SessionId, SessionRecord,
    UnlockRecord,
};
