//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Pre-compute expensive resources**: the HTTP client and DB pool are created once
//! 2. **Cheap cloning**: all fields use Arc or are already Clone-cheap
//! 3. **Immutable after creation**: state is read-only during request handling

use crate::config::AppConfig;
use crate::services::ai::AiClient;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state
///
/// This struct holds all shared resources that handlers need access to.
/// All fields are designed for cheap cloning across async tasks.
///
/// # Performance
///
/// - `db`: SqlitePool is internally Arc'd, cloning is O(1)
/// - `config`: wrapped in Arc, cloning is O(1)
/// - `ai`: holds a pooled reqwest client, cloning is O(1)
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-built generative AI client
    pub ai: AiClient,
}

impl AppState {
    /// Create a new application state
    ///
    /// # Note
    /// This builds the AI client (and its connection pool) from the
    /// config once, at application startup.
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let ai = AiClient::new(&config.ai);

        Self {
            db,
            config: Arc::new(config),
            ai,
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the AI client
    #[inline]
    pub fn ai(&self) -> &AiClient {
        &self.ai
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    async fn test_state_clone_is_cheap() {
        // This test ensures our state design allows cheap cloning
        let config = AppConfig::default();
        let pool = SqlitePool::connect_lazy("sqlite::memory:").unwrap();
        let state = AppState::new(pool, config);

        // Clone should be O(1) - just Arc increments
        let _cloned = state.clone();
    }
}
