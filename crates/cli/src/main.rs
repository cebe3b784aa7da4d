use anyhow::Context;
use clap::Parser;
use doh_relay_domain::CliOverrides;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "doh-relay")]
#[command(version)]
#[command(about = "DoH relay - races public DNS-over-HTTPS resolvers and caches their answers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting DoH relay v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();
    let services = di::RelayServices::new(&config)?;
    services.start_jobs(&config, shutdown.clone()).await;

    let web_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.bind_address, config.server.port
            )
        })?;

    server::start_web_server(web_addr, services.app_state(&config), &config, shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}
