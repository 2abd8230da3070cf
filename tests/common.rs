#![allow(dead_code, clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, missing_debug_implementations, unreachable_pub)]

use axum::http::StatusCode;
use postbox_server::config::{
    Config, LogFormat, MailConfig, RateLimitConfig, ServerConfig, StorageConfig, TelemetryConfig,
};
use postbox_server::{App, api};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};
use tempfile::TempDir;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("postbox_server=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

pub fn get_test_config(data_dir: PathBuf) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // 0 means let OS choose
            mgmt_port: 0,
        },
        mail: MailConfig {
            sendgrid_api_key: None,
            api_base: "https://api.sendgrid.com".to_string(),
            sender: None,
            site_domain: "example.com".to_string(),
            receiver: "owner@example.com".to_string(),
            autoreply: false,
            owner_name: "Nolan".to_string(),
        },
        storage: StorageConfig { data_dir },
        rate_limit: RateLimitConfig { per_second: 10_000, burst: 10_000 },
        telemetry: TelemetryConfig { log_format: LogFormat::Text },
    }
}

pub struct TestApp {
    pub api_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub config: Config,
    // Held so the store directory outlives the test.
    data_dir: Option<TempDir>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let data_dir = TempDir::new().expect("create temp data dir");
        let config = get_test_config(data_dir.path().to_path_buf());
        Self::spawn_inner(config, Some(data_dir)).await
    }

    pub async fn spawn_with_config(config: Config) -> Self {
        Self::spawn_inner(config, None).await
    }

    async fn spawn_inner(config: Config, data_dir: Option<TempDir>) -> Self {
        setup_tracing();

        let app = App::from_config(&config);
        let app_router = api::app_router(&config, app.contact_service);
        let mgmt_router = api::mgmt_router(api::MgmtState { health_service: app.health_service });

        let api_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind api listener");
        let api_addr = api_listener.local_addr().expect("api listener addr");
        tokio::spawn(async move {
            axum::serve(api_listener, app_router.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .expect("api server");
        });

        let mgmt_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind mgmt listener");
        let mgmt_addr = mgmt_listener.local_addr().expect("mgmt listener addr");
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt_router.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .expect("mgmt server");
        });

        Self {
            api_url: format!("http://{api_addr}"),
            mgmt_url: format!("http://{mgmt_addr}"),
            client: reqwest::Client::new(),
            config,
            data_dir,
        }
    }

    pub fn contacts_file(&self) -> PathBuf {
        self.config.storage.data_dir.join("contacts.json")
    }

    pub async fn read_contact_log(&self) -> Vec<serde_json::Value> {
        match tokio::fs::read(self.contacts_file()).await {
            Ok(bytes) => serde_json::from_slice(&bytes).expect("contact log is valid JSON"),
            Err(_) => Vec::new(),
        }
    }
}

/// A stand-in for the SendGrid API: records every mail-send request and
/// answers with a status chosen per hit index.
pub struct StubProvider {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl StubProvider {
    pub async fn spawn(status_for_hit: fn(usize) -> StatusCode) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        let router = axum::Router::new().route(
            "/v3/mail/send",
            axum::routing::post(move |axum::Json(body): axum::Json<serde_json::Value>| {
                let recorded = Arc::clone(&recorded);
                async move {
                    let hit = {
                        let mut guard = recorded.lock().unwrap();
                        guard.push(body);
                        guard.len() - 1
                    };
                    status_for_hit(hit)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub provider");
        let addr = listener.local_addr().expect("stub provider addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub provider server");
        });

        Self { base_url: format!("http://{addr}"), requests }
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Waits until the stub has seen `count` requests, panicking after two seconds.
    pub async fn wait_for_hits(&self, count: usize) {
        let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(2);
        while self.hits() < count {
            assert!(tokio::time::Instant::now() < deadline, "expected {count} provider requests, saw {}", self.hits());
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }
}

/// Creates a regular file that blocks use of `name` as a directory.
pub async fn block_path(parent: &Path, name: &str) -> PathBuf {
    let blocker = parent.join(name);
    tokio::fs::write(&blocker, b"").await.expect("write blocker file");
    blocker
}
