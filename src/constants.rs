/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-weather-presenter/0.1.0";

/// OpenWeatherMap API base URL
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeatherMap condition icon base URL
pub const OPENWEATHER_ICON_BASE: &str = "https://openweathermap.org/img/wn";

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Number of daily forecast cards kept when none is configured
pub const DEFAULT_DAILY_LIMIT: usize = 7;

/// Temperatures strictly above this raise the heat advisory
pub const HEAT_THRESHOLD_CELSIUS: f64 = 35.0;

/// Background image base URL
pub const BACKGROUND_IMAGE_BASE: &str = "https://source.unsplash.com/800x600/";
