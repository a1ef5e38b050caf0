//! Standalone host harness for the Tally hello plugin.
//!
//! Boots a minimal stand-in for the Tally host process: a service
//! registry primed with the host logging services, a Prometheus metrics
//! recorder, and an axum server exposing the plugin's HTTP handler plus
//! host-side `/health` and `/metrics` routes.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package hello-plugin-standalone
//! curl -H 'X-Tally-Api-Key: T-123' -H 'X-Tally-Api-Secret: s3cret' \
//!     http://127.0.0.1:8080/plugins/hello-plugin
//! ```
//!
//! Settings load from `tally.toml` in the working directory (when
//! present) and `TALLY_*` environment variables.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::{Deserialize, Serialize};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tally_host::{
    EventDispatcher, Healthcheck, HttpHandler, LogSink, LoggerFactory, PluginHttpRequest,
    REGION_PROP, ServiceRegistry, SinkLoggerFactory, Tenant, TracingLogSink, plugin_properties,
};
use tally_plugin_hello::{HelloActivator, PLUGIN_NAME};

/// Registration name for services the host itself provides.
const HOST_NAME: &str = "tally-core";

/// Credential header pair the host resolves into a tenant.
const API_KEY_HEADER: &str = "x-tally-api-key";
const API_SECRET_HEADER: &str = "x-tally-api-secret";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HostSettings {
    /// Address the demo host listens on.
    listen_addr: String,
    /// Deployment region handed to plugins at startup.
    region: String,
    /// Startup property bag for the hello plugin.
    #[serde(default)]
    plugin: HashMap<String, String>,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            region: "us-east-1".to_string(),
            plugin: HashMap::new(),
        }
    }
}

impl HostSettings {
    /// Layers `tally.toml` (when present) and `TALLY_*` environment
    /// variables over the defaults.
    fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("tally.toml"))
            .merge(Env::prefixed("TALLY_"))
            .extract()
            .context("failed to load host settings")
    }
}

/// Shared state for the demo host's routes.
struct AppState {
    servlet: Arc<dyn HttpHandler>,
    healthcheck: Arc<dyn Healthcheck>,
    prometheus: PrometheusHandle,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = HostSettings::load()?;

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")?;

    let registry = Arc::new(ServiceRegistry::new());
    let dispatcher = Arc::new(EventDispatcher::new());

    // Host-provided logging services; the plugin resolves both at startup.
    let sink: Arc<dyn LogSink> = Arc::new(TracingLogSink);
    let factory: Arc<dyn LoggerFactory> = Arc::new(SinkLoggerFactory::new(Arc::clone(&sink)));
    registry.register(sink, plugin_properties(HOST_NAME))?;
    registry.register(factory, plugin_properties(HOST_NAME))?;

    let mut properties = settings.plugin.clone();
    properties.insert(REGION_PROP.to_string(), settings.region.clone());

    let activator = Arc::new(HelloActivator::new(
        Arc::clone(&registry),
        Arc::clone(&dispatcher),
    ));
    activator.start(&properties).await?;

    let servlet = registry
        .lookup::<dyn HttpHandler>(PLUGIN_NAME)
        .context("hello plugin did not register an HTTP handler")?;
    let healthcheck = registry
        .lookup::<dyn Healthcheck>(PLUGIN_NAME)
        .context("hello plugin did not register a healthcheck")?;

    let state = Arc::new(AppState {
        servlet,
        healthcheck,
        prometheus,
    });

    let router = Router::new()
        .route(&format!("/plugins/{PLUGIN_NAME}"), get(plugin_route))
        .route("/health", get(health_route))
        .route("/metrics", get(metrics_route))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&settings.listen_addr).await?;
    info!(addr = %listener.local_addr()?, "Tally demo host listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    activator.stop().await;

    Ok(())
}

/// `GET /plugins/hello-plugin` — forwards to the plugin's handler with
/// the tenant resolved from the credential header pair.
async fn plugin_route(State(state): State<Arc<AppState>>, headers: HeaderMap) -> StatusCode {
    let mut request = PluginHttpRequest::get("/");
    if let Some(tenant) = resolve_tenant(&headers) {
        request = request.with_tenant(tenant);
    }

    let response = state.servlet.handle(request).await;
    StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK)
}

async fn health_route(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let status = state.healthcheck.check();
    Json(serde_json::json!({
        "plugin": PLUGIN_NAME,
        "healthy": status.is_healthy(),
    }))
}

async fn metrics_route(State(state): State<Arc<AppState>>) -> String {
    state.prometheus.render()
}

/// Both credential headers must be present. The key value doubles as the
/// tenant identifier here; the real host looks the pair up instead.
fn resolve_tenant(headers: &HeaderMap) -> Option<Tenant> {
    let key = headers.get(API_KEY_HEADER)?.to_str().ok()?;
    headers.get(API_SECRET_HEADER)?;
    Some(Tenant::new(key))
}

/// Blocks until Ctrl+C or SIGTERM.
async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to register SIGTERM handler");

        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        info!("Received Ctrl+C, shutting down");
    }
}
