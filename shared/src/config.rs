use std::env;

use crate::errors::{Result, ServiceError};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ServiceError::Internal("DATABASE_URL not set".to_string()))?,
            max_connections: env::var("MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .map_err(|e| ServiceError::Internal(format!("Invalid MAX_CONNECTIONS: {}", e)))?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub cors_allowed_origin: Option<String>,
    pub run_migrations: bool,
}

impl ServiceConfig {
    pub fn from_env(default_port: u16) -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| default_port.to_string())
                .parse()
                .map_err(|e| ServiceError::Internal(format!("Invalid PORT: {}", e)))?,
            metrics_port: env::var("METRICS_PORT")
                .unwrap_or_else(|_| "9092".to_string())
                .parse()
                .map_err(|e| ServiceError::Internal(format!("Invalid METRICS_PORT: {}", e)))?,
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
            run_migrations: env::var("RUN_MIGRATIONS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .map_err(|e| ServiceError::Internal(format!("Invalid RUN_MIGRATIONS: {}", e)))?,
        })
    }
}
