use std::sync::Arc;

use sqlx::SqlitePool;

use crate::cart::CartStore;
use crate::core::Config;
use crate::core::tasks::BackgroundTasks;
use crate::db::DbService;
use crate::utils::AppError;

/// Interval between cart expiry sweeps
const CART_SWEEP_INTERVAL_SECS: u64 = 60;

/// Shared server state
///
/// Holds the connection pool and the session cart store. `Clone` is shallow
/// (pool handles and `Arc`s), so handlers can take it by value.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub carts: Arc<CartStore>,
}

impl ServerState {
    /// Open the database and build the shared state
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.db_path).await?;
        Ok(Self {
            config: Arc::new(config.clone()),
            pool: db.pool,
            carts: Arc::new(CartStore::new()),
        })
    }

    /// Start background tasks (cart expiry sweeper)
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        let carts = self.carts.clone();
        tasks.spawn_periodic(
            "cart_sweeper",
            std::time::Duration::from_secs(CART_SWEEP_INTERVAL_SECS),
            move || {
                let carts = carts.clone();
                async move {
                    let removed = carts.sweep_expired();
                    if removed > 0 {
                        tracing::debug!(removed, "Expired carts swept");
                    }
                }
            },
        );

        tasks
    }
}
