//! Common test utilities for E2E tests

use irontree::{AppState, config, keys, model};
use tokio::net::TcpListener;

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Create a new test server instance
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test server from a specific configuration
    pub async fn with_config(config: config::AppConfig) -> Self {
        // Small test key; generation of a full-size key is too slow for CI.
        let keypair = keys::generate_keypair_with_bits(1024).await.unwrap();
        let identity = model::Identity::new(config.identity.username.clone(), keypair);

        let state = AppState::new(config, identity).unwrap();

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        // Build router
        let app = irontree::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait a bit for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        Self {
            addr: addr_str,
            state,
            client,
        }
    }

    /// Get base URL for requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Stored activity id
    pub fn activity_id(&self) -> String {
        self.state.repository.activity().id.to_string()
    }

    /// Stored note id
    pub fn note_id(&self) -> String {
        self.state.repository.activity().object.id.to_string()
    }
}

/// Default test configuration
pub fn test_config() -> config::AppConfig {
    config::AppConfig {
        server: config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Let OS assign port
            domain: "test.example.com".to_string(),
            protocol: "https".to_string(),
        },
        identity: config::IdentityConfig {
            username: "testUser".to_string(),
            status_content: Some("Hello from the test instance.".to_string()),
        },
        federation: config::FederationConfig {
            target: config::FederationTarget {
                actor_uri: "https://remote.example/users/faleidel".to_string(),
                inbox_uri: "https://remote.example/inbox".to_string(),
                address: "@faleidel@remote.example".to_string(),
            },
            deliver_on_startup: false,
        },
        logging: config::LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
    }
}
