//! Irontree binary entry point

use irontree::{AppState, config, keys, model};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point
///
/// # Setup
/// 1. Initialize tracing/logging
/// 2. Load configuration from file and environment
/// 3. Generate the actor keypair (fatal on failure)
/// 4. Initialize AppState (identity, activity, document builder)
/// 5. Bind and start the HTTP server
/// 6. Fire the one startup delivery once the server is listening
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize tracing/logging
    let log_format =
        std::env::var("IRONTREE__LOGGING__FORMAT").unwrap_or_else(|_| "pretty".to_string());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "irontree=info,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "irontree=info,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!("Starting Irontree...");

    // 2. Load configuration
    let config = config::AppConfig::load()?;
    tracing::info!(
        domain = %config.server.domain,
        protocol = %config.server.protocol,
        username = %config.identity.username,
        "Configuration loaded"
    );

    // 3. Generate the actor keypair. Nothing else may start before this
    // completes: the actor document and outbound signature both need it.
    tracing::info!("Generating actor keypair...");
    let keypair = keys::generate_keypair().await?;
    let identity = model::Identity::new(config.identity.username.clone(), keypair);
    tracing::info!("Actor keypair ready");

    // 4. Initialize application state
    let state = AppState::new(config.clone(), identity)?;

    // 5. Build router and bind the listener
    let app = irontree::build_router(state.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Public URL: {}", config.server.base_url());

    // 6. Fire-and-forget startup delivery
    if config.federation.deliver_on_startup {
        spawn_delivery_task(state.clone());
    } else {
        tracing::info!("Startup delivery disabled (federation.deliver_on_startup=false)");
    }

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}

/// Spawn the single startup delivery
///
/// The outcome is logged and otherwise ignored; a failed delivery does
/// not affect server availability.
fn spawn_delivery_task(state: AppState) {
    tokio::spawn(async move {
        let delivery = match state.delivery() {
            Ok(delivery) => delivery,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build delivery client");
                return;
            }
        };

        let document = state
            .documents
            .activity(state.repository.activity(), &state.identity.name);

        match delivery.deliver(&document).await {
            Ok(()) => {
                tracing::info!(
                    inbox = %state.config.federation.target.inbox_uri,
                    "Startup delivery completed"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Startup delivery failed");
            }
        }
    });

    tracing::info!("Delivery task spawned");
}
