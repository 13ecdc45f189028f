use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tower_sessions::session_store::ExpiredDeletion;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulselog::constants::SESSION_PURGE_INTERVAL_SECS;
use pulselog::db::{
    create_pool, MemoryUserStore, MemoryWorkoutStore, PgUserStore, PgWorkoutStore, UserStore,
    WorkoutStore,
};
use pulselog::routes;
use pulselog::session::MemorySessionStore;
use pulselog::weather::OpenWeatherClient;
use pulselog::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulselog=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PulseLog...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Server: {}",
        config.environment,
        config.server_address()
    );

    let (users, workouts): (Arc<dyn UserStore>, Arc<dyn WorkoutStore>) =
        match config.database_url.as_deref() {
            Some(database_url) => {
                let pool = create_pool(database_url, config.db_max_connections).await?;

                tracing::info!("Running database migrations...");
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Migrations complete");

                (
                    Arc::new(PgUserStore::new(pool.clone())) as Arc<dyn UserStore>,
                    Arc::new(PgWorkoutStore::new(pool)) as Arc<dyn WorkoutStore>,
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, data will be kept in memory only");
                (
                    Arc::new(MemoryUserStore::new()) as Arc<dyn UserStore>,
                    Arc::new(MemoryWorkoutStore::new()) as Arc<dyn WorkoutStore>,
                )
            }
        };

    let sessions = MemorySessionStore::new();

    // Sweep expired sessions in the background
    let sweeper = sessions.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(SESSION_PURGE_INTERVAL_SECS));
        loop {
            interval.tick().await;
            if let Err(e) = sweeper.delete_expired().await {
                tracing::error!("Failed to delete expired sessions: {}", e);
            }
        }
    });

    if config.weather_api_key.is_none() {
        tracing::warn!("WEATHER_API_KEY not set, weather lookups will be unavailable");
    }
    let weather = Arc::new(OpenWeatherClient::new(
        config.weather_api_key.clone(),
        config.weather_api_url.clone(),
    ));

    // Create app state
    let state = AppState::new(config.clone(), users, workouts, weather);

    // Build router
    let app = routes::router(state, sessions);

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
