use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use std::sync::Arc;

use crate::classifier::DisplayMode;
use crate::client::{Location, OpenWeatherClient};
use crate::config::WeatherConfig;
use crate::error::WeatherError;
use crate::formatters::format_report;
use crate::models::{GetWeatherByCityRequest, GetWeatherByCoordinatesRequest};
use crate::presentation::WeatherReport;

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    client: Arc<OpenWeatherClient>,
    daily_limit: usize,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = OpenWeatherClient::new(config)?;

        Ok(Self {
            client: Arc::new(client),
            daily_limit: config.daily_limit,
            tool_router: Self::tool_router(),
        })
    }

    /// Fetches both payloads and builds the report
    pub async fn lookup(
        &self,
        location: &Location,
        mode: DisplayMode,
    ) -> Result<WeatherReport, WeatherError> {
        let current = self.client.current(location).await?;
        let forecast = self.client.forecast(location).await?;

        Ok(WeatherReport::build(
            &current,
            &forecast,
            mode,
            self.daily_limit,
        ))
    }

    async fn respond(
        &self,
        location: Location,
        dark_mode: bool,
    ) -> Result<CallToolResult, McpError> {
        let mode = if dark_mode {
            DisplayMode::Dark
        } else {
            DisplayMode::Light
        };

        let report = self.lookup(&location, mode).await.map_err(|e| {
            tracing::info!("Lookup for {} failed: {}", location, e);
            to_mcp_error(e)
        })?;

        let json = serde_json::to_string_pretty(&report).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize report: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![
            Content::text(format_report(&report)),
            Content::text(json),
        ]))
    }
}

fn to_mcp_error(e: WeatherError) -> McpError {
    if e.is_user_error() {
        McpError::invalid_params(e.to_string(), None)
    } else {
        McpError::internal_error(format!("Failed to fetch weather: {}", e), None)
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-weather-presenter".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather lookups powered by OpenWeatherMap. Returns current conditions, \
                an advisory alert, a background image, daily forecast cards and a \
                temperature series, as text and as JSON."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Looks up weather for a place name
    #[tool(description = "Get current weather and forecast for a city (e.g., 'London' or 'Paris,FR'). Set dark_mode to use the dark theme background.")]
    pub async fn get_weather_by_city(
        &self,
        Parameters(request): Parameters<GetWeatherByCityRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting weather for city: {}", request.city);

        self.respond(Location::City(request.city), request.dark_mode)
            .await
    }

    /// Looks up weather for a coordinate pair
    #[tool(description = "Get current weather and forecast for a latitude/longitude pair (e.g., latitude: 52.52, longitude: 13.41 for Berlin). Set dark_mode to use the dark theme background.")]
    pub async fn get_weather_by_coordinates(
        &self,
        Parameters(request): Parameters<GetWeatherByCoordinatesRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting weather for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let location = Location::Coordinates {
            latitude: request.latitude,
            longitude: request.longitude,
        };
        self.respond(location, request.dark_mode).await
    }
}
