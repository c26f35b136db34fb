mod model;
mod server;

use tokio_util::sync::CancellationToken;

use crate::server::{
    config::Config,
    event::{spawn_event_logger, EventBus},
    router, startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let stores = startup::connect_to_cache(&config).await?;

    let shutdown = CancellationToken::new();
    let events = EventBus::new(config.event_channel_capacity);
    let event_logger = spawn_event_logger(&events, shutdown.clone());

    let state = AppState::new(
        db,
        stores.vip_store,
        stores.purchase_cache,
        events,
        config.bundle_discount_percent,
        config.purchase_timeout,
        config.admin_user_ids.clone(),
        shutdown.clone(),
    );

    let app = router::router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Starting server on {}", config.bind_address);

    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            startup::shutdown_signal().await;
            server_shutdown.cancel();
        })
        .await?;

    shutdown.cancel();
    if let Err(e) = event_logger.await {
        tracing::error!("Event logger task failed: {}", e);
    }

    Ok(())
}
