use std::sync::Arc;
use tokio::signal;
use tracing::info;

use game_persistence::{connection::connect_and_migrate, repositories::WordRepository};
use game_server::{auth::AuthService, config::Config, create_routes, service::GameService};

/// Starter pool used to bootstrap an empty database.
const STARTER_WORDS: &[&str] = &[
    "ABOUT", "ABOVE", "ABUSE", "ACTOR", "ACUTE", "ADMIT", "ADOPT", "ADULT", "AFTER", "AGAIN",
    "AGENT", "AGREE", "AHEAD", "ALARM", "ALBUM", "ALERT", "ALIEN", "ALIGN", "ALIKE", "ALIVE",
];

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting daily word server...");

    let config = Config::new();

    // Initialize database connection and run migrations
    let db = match connect_and_migrate().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };

    // Seed the word pool on first run
    let words = WordRepository::new(db.clone());
    match words.count_active().await {
        Ok(0) => match words.seed_words(STARTER_WORDS).await {
            Ok(created) => info!("Seeded {} starter words", created),
            Err(e) => {
                tracing::error!("Failed to seed starter words: {}", e);
                std::process::exit(1);
            }
        },
        Ok(count) => info!("Word pool holds {} active words", count),
        Err(e) => {
            tracing::error!("Failed to inspect word pool: {}", e);
            std::process::exit(1);
        }
    }

    let game_service = Arc::new(GameService::new(
        db,
        config.daily_game_limit,
        config.max_guesses,
    ));
    let auth_service = Arc::new(AuthService::new());

    let routes = create_routes(game_service, auth_service);

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = match config.host.parse::<std::net::IpAddr>() {
        Ok(ip) => (ip, config.port),
        Err(e) => {
            tracing::error!("Invalid HOST {:?}: {}", config.host, e);
            std::process::exit(1);
        }
    };

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
                .expect("Failed to install SIGINT handler");
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler");

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
