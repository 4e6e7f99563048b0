use clap::Parser;
use stubdns_domain::CliOverrides;
use stubdns_infrastructure::dns::server::DnsServerHandler;
use tracing::info;

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "stubdns")]
#[command(version)]
#[command(about = "stubdns - minimal DNS responder with optional upstream forwarding")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Upstream resolver (host:port); without one every question gets 0.0.0.0
    #[arg(short = 'r', long, value_name = "HOST:PORT")]
    resolver: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream query timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        resolver: cli.resolver,
        query_timeout_ms: cli.timeout_ms,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting stubdns v{}", env!("CARGO_PKG_VERSION"));

    let use_case = bootstrap::build_use_case(&config).await?;
    let dns_addr = bootstrap::resolve_address(&config.server.listen_address()).await?;
    let dns_handler = DnsServerHandler::new(use_case);

    server::start_dns_server(dns_addr, dns_handler).await?;

    info!("Server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_all_flags() {
        let cli = Cli::parse_from([
            "stubdns",
            "--resolver",
            "8.8.8.8:53",
            "--dns-port",
            "5353",
            "--bind",
            "0.0.0.0",
            "--timeout-ms",
            "750",
            "--log-level",
            "debug",
        ]);

        assert_eq!(cli.resolver.as_deref(), Some("8.8.8.8:53"));
        assert_eq!(cli.dns_port, Some(5353));
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.timeout_ms, Some(750));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_defaults_to_no_overrides() {
        let cli = Cli::parse_from(["stubdns"]);
        assert!(cli.resolver.is_none());
        assert!(cli.dns_port.is_none());
    }
}
