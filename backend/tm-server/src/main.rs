use std::error::Error;
use std::sync::Arc;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

use tm_auth::{CredentialVerifier, PasswordPolicy, TokenIssuer};
use tm_db::UserRepository;
use tm_server::{build_router, logger, ServerState};
use tm_ws::{
    AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry, EventPublisher,
    ShutdownCoordinator,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = tm_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = tm_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting tm-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../crates/tm-db/migrations")
        .run(&pool)
        .await?;
    info!("Migrations complete");

    // Credential verification stack
    let policy = PasswordPolicy::new(config.auth.min_hash_cost)?;
    let store = Arc::new(UserRepository::new(pool.clone()));
    let verifier = Arc::new(CredentialVerifier::new(store, policy));
    info!("Credential verifier initialized");

    // Token issuer, fatal when the secret or algorithm is invalid
    let token_issuer = Arc::new(TokenIssuer::new(
        &config.auth.algorithm,
        config.auth.secret_bytes()?,
        config.auth.token_lifetime_secs,
    )?);
    info!("Token issuer initialized ({})", token_issuer.algorithm());

    // Create connection config for tm-ws
    let connection_config = ConnectionConfig {
        send_buffer_size: config.websocket.send_buffer_size,
        write_timeout_ms: config.websocket.write_timeout_ms,
    };

    // Create connection registry with limits
    let registry = ConnectionRegistry::new(
        ConnectionLimits {
            max_total: config.server.max_connections,
        },
        connection_config.clone(),
    );

    // Event publisher pushes task changes to every registered connection
    let publisher = EventPublisher::new(registry.clone());

    // Create shutdown coordinator
    let shutdown = ShutdownCoordinator::new();

    // Build application state
    let state = ServerState {
        pool,
        verifier,
        token_issuer,
        publisher,
        ws: AppState {
            registry,
            shutdown: shutdown.clone(),
            config: connection_config,
        },
    };

    // Build router
    let app = build_router(state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.subscribe_guard().wait().await;
            info!("Graceful shutdown complete");
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
