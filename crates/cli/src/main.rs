//! Order desk entry point.

mod repl;

use client::{ApiConfig, OrdersApi};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    let config = ApiConfig::from_env();

    // Logs go to stderr; stdout belongs to the command loop.
    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(base_url = %config.base_url, "order desk starting");

    let api = OrdersApi::new(&config);
    if let Err(err) = repl::run(&api).await {
        eprintln!("terminal error: {err}");
        std::process::exit(1);
    }
}
