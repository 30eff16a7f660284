use anyhow::Result;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcp_weather_presenter::service::Weather;
use mcp_weather_presenter::WeatherConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP transport
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_weather_presenter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting MCP weather presenter");

    let config = WeatherConfig::from_env()?;
    tracing::info!(
        "Using {} with up to {} daily cards",
        config.base_url,
        config.daily_limit
    );

    let weather = Weather::new(&config)?;
    let server = weather.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
