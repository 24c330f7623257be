mod app_state;
mod config;
mod database;
mod models;
mod routes;
mod services;
#[cfg(test)]
mod test_support;
pub use app_state::AppState;
pub use config::Config;

use crate::routes::make_app;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::init()?;
    let port = config.app_port;
    let app = make_app(config).await?;
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("🚀 Server running on port {port}");
    axum::serve(listener, app).await?;
    Ok(())
}
