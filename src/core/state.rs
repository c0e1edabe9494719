use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Server state - shared service handles for all request handlers
///
/// Cloned per request by axum; every field is cheap to clone.
///
/// | Field       | Type            | Description               |
/// |-------------|-----------------|---------------------------|
/// | config      | Config          | configuration (immutable) |
/// | db          | DbService       | SQLite pool               |
/// | jwt_service | Arc<JwtService> | JWT validation            |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Database service
    pub db: DbService,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize server state
    ///
    /// Opens the database (running migrations) and sets up the JWT
    /// service from configuration.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.db_path).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
        })
    }

    /// JWT service handle
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
