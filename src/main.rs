//! DeepAgent server binary.

use deepagent::client::ApiClient;
use deepagent::config::Config;
use deepagent::poller::Poller;
use deepagent::web::Server;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("deepagent=info".parse()?))
        .init();

    // Load configuration
    let cfg = Config::load();
    tracing::info!("Starting DeepAgent on port {}...", cfg.http_port);

    // Optionally poll our own API and log a periodic health summary, a
    // terminal view of what the browser dashboard shows.
    let _poller = if cfg.self_poll {
        let base_url = format!("http://127.0.0.1:{}", cfg.http_port);
        tracing::info!("Self-polling enabled against {}", base_url);

        let mut client = ApiClient::new(&base_url)?;
        if let Some(token) = &cfg.auth_token {
            client = client.with_token(token);
        }

        let poller = Poller::new(Arc::new(client), cfg.refresh.clone());
        poller.start();

        let dashboard = poller.dashboard();
        let period = cfg.refresh.status;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let status = dashboard.status.snapshot().await;
                if status.is_loading() {
                    continue;
                }
                match (&status.data, &status.error) {
                    (_, Some(err)) => tracing::warn!("System status unavailable: {}", err),
                    (Some(data), None) => tracing::info!("System status: {:?}", data.overall),
                    _ => {}
                }
            }
        });

        Some(poller)
    } else {
        None
    };

    // Start web server
    let server = Server::new(cfg);
    server.start().await?;

    Ok(())
}
