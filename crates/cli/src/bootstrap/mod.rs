use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use stubdns_application::use_cases::BuildResponseUseCase;
use stubdns_domain::{CliOverrides, Config};
use stubdns_infrastructure::dns::UdpForwardGateway;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// RUST_LOG wins over the configured level when set.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}

/// Stub-only when no resolver is configured.
pub async fn build_use_case(config: &Config) -> anyhow::Result<Arc<BuildResponseUseCase>> {
    let Some(resolver) = config.upstream.resolver.as_deref() else {
        warn!("No upstream resolver configured, answering every question with 0.0.0.0");
        return Ok(Arc::new(BuildResponseUseCase::new()));
    };

    let server_addr = resolve_address(resolver)
        .await
        .with_context(|| format!("Failed to resolve upstream resolver {}", resolver))?;
    let timeout = Duration::from_millis(config.upstream.query_timeout_ms);

    info!(
        upstream = %server_addr,
        timeout_ms = config.upstream.query_timeout_ms,
        "Forwarding recursive queries"
    );

    let gateway = UdpForwardGateway::new(server_addr, timeout);
    Ok(Arc::new(BuildResponseUseCase::new().with_gateway(Arc::new(gateway))))
}

/// First address `host:port` resolves to.
pub async fn resolve_address(address: &str) -> anyhow::Result<SocketAddr> {
    tokio::net::lookup_host(address)
        .await?
        .next()
        .ok_or_else(|| anyhow::anyhow!("{} resolved to no addresses", address))
}
