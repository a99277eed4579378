use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookstore::auth::JwtKeys;
use bookstore::infrastructure::AppState;
use bookstore::{config, db, seed, server};

const DEV_JWT_SECRET: &str = "bookstore-dev-secret-change-me";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookstore=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    // --profile on the command line wins over PROFILE
    let args: Vec<String> = std::env::args().collect();
    let cli_profile = args
        .iter()
        .position(|arg| arg == "--profile")
        .and_then(|pos| args.get(pos + 1))
        .cloned();

    let config = config::Config::from_lookup(|key| match (key, &cli_profile) {
        ("PROFILE", Some(profile)) => Some(profile.clone()),
        _ => std::env::var(key).ok(),
    });

    // Initialize database
    let db = db::init_db(&config.database_url).await?;
    tracing::info!("Database ready at {}", config.database_url);

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&db).await {
            tracing::error!("Failed to seed data: {}", e);
        }
    }

    match &config.staff {
        Some(account) => seed::bootstrap_staff(&db, account).await?,
        None => tracing::warn!("STAFF_EMAIL/STAFF_PASSWORD not set, no staff account bootstrapped"),
    }

    let jwt = match &config.jwt_secret {
        Some(secret) => JwtKeys::new(secret),
        None => {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            JwtKeys::new(DEV_JWT_SECRET)
        }
    };

    let app = server::build_router(AppState::new(db, jwt), &config.cors_allowed_origins);

    // Find available port
    let port = server::find_available_port(config.port)
        .ok_or_else(|| format!("No free port found from {}", config.port))?;

    if port != config.port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            config.port,
            port
        );
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Bookstore server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}
