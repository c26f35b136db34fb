use std::sync::Arc;

use crate::server::{
    cache::{
        memory_store::MemoryCacheStore, redis_store::RedisCacheStore, PurchasedChapterCache,
        VipStatusStore,
    },
    config::Config,
    error::AppError,
};

/// Installs the global tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to `info` with SQL statement logging quieted.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the catalog, wallet and ledger tables and
/// their unique indexes exist before the first request.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// VIP status store and purchased-chapter cache backed by one implementation.
pub struct CacheStores {
    pub vip_store: Arc<dyn VipStatusStore>,
    pub purchase_cache: Arc<dyn PurchasedChapterCache>,
}

/// Connects the cache stores.
///
/// Uses Redis when `REDIS_URL` is configured, otherwise an in-process store whose
/// state is lost on restart and not shared between instances.
///
/// # Returns
/// - `Ok(CacheStores)` - Connected stores
/// - `Err(AppError::CacheErr)` - Invalid Redis URL or failed initial connection
pub async fn connect_to_cache(config: &Config) -> Result<CacheStores, AppError> {
    match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            let conn = redis::aio::ConnectionManager::new(client).await?;
            let store = Arc::new(RedisCacheStore::new(conn, config.cache_prefix.clone()));

            tracing::info!("Using Redis cache store with prefix '{}'", config.cache_prefix);

            Ok(CacheStores {
                vip_store: store.clone(),
                purchase_cache: store,
            })
        }
        None => {
            tracing::warn!("REDIS_URL not set, VIP status is kept in process memory");

            let store = Arc::new(MemoryCacheStore::new());

            Ok(CacheStores {
                vip_store: store.clone(),
                purchase_cache: store,
            })
        }
    }
}

/// Resolves when the process receives Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
