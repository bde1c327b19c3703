mod cli;
mod console;
mod env;
mod session;

use std::sync::Arc;
use std::time::Duration;

use campusloop_api::{HttpCampusApi, HttpConfig, StaticToken};
use campusloop_client::{CampusClient, ClientOptions};
use campusloop_common::UserId;
use campusloop_config::CampusConfig;
use campusloop_sync::{EventChannel, EventChannelConfig};
use tracing_subscriber::EnvFilter;

fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "campusloop=info".parse().unwrap()),
            ),
        )
        .init();
}

fn channel_config(config: &CampusConfig) -> EventChannelConfig {
    EventChannelConfig::new(config.server.ws_url.clone())
        .with_reconnect_delay(Duration::from_millis(u64::from(
            config.channel.reconnect_delay_ms,
        )))
        .with_connect_timeout(Duration::from_secs(u64::from(
            config.channel.connect_timeout_secs,
        )))
        .with_signal_buffer(config.channel.signal_buffer as usize)
}

fn http_config(config: &CampusConfig) -> HttpConfig {
    HttpConfig::new(config.server.api_base_url.clone()).with_timeouts(
        Duration::from_secs(u64::from(config.server.request_timeout_secs)),
        Duration::from_secs(u64::from(config.server.connect_timeout_secs)),
    )
}

#[tokio::main]
async fn main() {
    env::load_dotenv();
    let args = cli::parse();

    let loaded = campusloop_config::load_config(args.config.as_deref());
    let level = args.log_level.clone().unwrap_or_else(|| {
        loaded
            .as_ref()
            .map(|c| c.logging.level.clone())
            .unwrap_or_else(|_| "info".into())
    });
    init_logging(&format!("campusloop={level}"));

    tracing::info!("CampusLoop v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        CampusConfig::default()
    });

    let identity = env::flag_or_env(args.user_id, env::USER_ID_VAR).map(UserId::new);
    let token = env::flag_or_env(args.token, env::TOKEN_VAR);
    if identity.is_none() {
        tracing::warn!("No user id given; browsing only, submissions are disabled");
    }

    let api = match HttpCampusApi::new(http_config(&config), Arc::new(StaticToken::new(token))) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    match api.health().await {
        Ok(()) => tracing::info!("Server reachable at {}", api.config().base_url),
        Err(e) => tracing::warn!("Server health check failed, continuing: {e}"),
    }

    let options = ClientOptions::from_config(&config)
        .with_identity(identity)
        .with_seed(args.seed);
    let channel = EventChannel::new(channel_config(&config));
    let mut client = CampusClient::new(Arc::new(api), channel, options);
    tracing::info!(
        buildings = client.layout().len(),
        generation = client.layout().generation(),
        "Campus layout ready"
    );

    client.connect();
    if let Err(e) = session::run(client).await {
        tracing::error!("Session error: {e}");
    }
    tracing::info!("Shutdown complete");
}
