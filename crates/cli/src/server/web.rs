use anyhow::Context;
use doh_relay_api::{create_doh_routes, AppState, RouteSettings};
use doh_relay_domain::Config;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn start_web_server(
    bind_addr: SocketAddr,
    state: AppState,
    config: &Config,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        doh_url = format!("http://{}{}", bind_addr, config.server.path),
        "Starting web server"
    );

    let app = create_doh_routes(state, &RouteSettings::from(&config.server));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    info!("Web server started successfully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("Web server terminated unexpectedly")?;

    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, draining in-flight requests");
        }
        _ = shutdown.cancelled() => {}
    }
    shutdown.cancel();
}
