//! Client and service behaviour against a mock OpenWeatherMap server

use mcp_weather_presenter::classifier::{HEAT_MESSAGE, THUNDERSTORM_MESSAGE};
use mcp_weather_presenter::models::{GetWeatherByCityRequest, GetWeatherByCoordinatesRequest};
use mcp_weather_presenter::service::Weather;
use mcp_weather_presenter::{
    DisplayMode, Location, OpenWeatherClient, Severity, WeatherConfig, WeatherError,
};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ErrorCode};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn config_for(server: &MockServer) -> WeatherConfig {
    let mut config = WeatherConfig::new("test-key");
    config.base_url = server.uri();
    config.timeout_secs = 5;
    config
}

fn current_body(label: &str, temp: f64) -> serde_json::Value {
    serde_json::json!({
        "weather": [{ "id": 200, "main": label, "description": "as observed", "icon": "11d" }],
        "main": { "temp": temp, "feels_like": temp, "humidity": 30 },
        "wind": { "speed": 2.5 },
        "name": "Phoenix",
        "sys": { "country": "US" },
        "timezone": -25200
    })
}

fn forecast_body() -> serde_json::Value {
    // 2024-07-01 00:00, 03:00, 2024-07-02 00:00 at UTC-7, then an entry with no usable time
    serde_json::json!({
        "cod": "200",
        "list": [
            { "dt": 1719817200, "dt_txt": "2024-07-01 07:00:00",
              "main": { "temp": 33.0 }, "weather": [{ "main": "Clear", "description": "clear sky", "icon": "01n" }] },
            { "dt": 1719828000, "dt_txt": "2024-07-01 10:00:00",
              "main": { "temp": 31.0 }, "weather": [{ "main": "Clear", "description": "clear sky", "icon": "01n" }] },
            { "dt": 1719903600, "dt_txt": "2024-07-02 07:00:00",
              "main": { "temp": 30.0 }, "weather": [{ "main": "Clouds", "description": "few clouds", "icon": "02n" }] },
            { "dt_txt": "not a time",
              "main": { "temp": 50.0 }, "weather": [{ "main": "Clear" }] }
        ],
        "city": { "name": "Phoenix", "country": "US", "timezone": -25200 }
    })
}

#[tokio::test]
async fn current_by_city_sends_metric_query_with_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Phoenix"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Clear", 41.0)))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&config_for(&server)).unwrap();
    let current = client
        .current(&Location::City(" Phoenix ".into()))
        .await
        .unwrap();

    assert_eq!(current.label(), Some("Clear"));
    assert_eq!(current.temperature(), Some(41.0));
}

#[tokio::test]
async fn forecast_by_coordinates_sends_lat_lon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "33.45"))
        .and(query_param("lon", "-112.07"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&config_for(&server)).unwrap();
    let forecast = client
        .forecast(&Location::Coordinates {
            latitude: 33.45,
            longitude: -112.07,
        })
        .await
        .unwrap();

    assert_eq!(forecast.list.len(), 4);
    assert_eq!(forecast.utc_offset_secs(), Some(-25200));
}

#[tokio::test]
async fn unknown_city_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&config_for(&server)).unwrap();
    let err = client
        .current(&Location::City("Atlantis".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::LocationNotFound));
    assert_eq!(err.to_string(), "City not found. Please try again.");
}

#[tokio::test]
async fn rejected_key_and_server_errors_are_distinguished() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&config_for(&server)).unwrap();
    let location = Location::City("Phoenix".into());

    assert!(matches!(
        client.current(&location).await,
        Err(WeatherError::Unauthorized)
    ));
    match client.forecast(&location).await {
        Err(WeatherError::RequestFailed(message)) => assert!(message.contains("503")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&config_for(&server)).unwrap();
    let err = client
        .forecast(&Location::City("Phoenix".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn blank_city_never_reaches_the_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&config_for(&server)).unwrap();
    let err = client
        .current(&Location::City("  ".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::EmptyCity));
}

#[tokio::test]
async fn lookup_builds_a_full_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Clear", 41.0)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let weather = Weather::new(&config_for(&server)).unwrap();
    let report = weather
        .lookup(&Location::City("Phoenix".into()), DisplayMode::Light)
        .await
        .unwrap();

    let alert = report.alert.as_ref().unwrap();
    assert_eq!(alert.severity, Severity::Warning);
    assert_eq!(alert.message, HEAT_MESSAGE);
    assert!(report.background.url().ends_with("?clear-sky"));

    assert_eq!(report.daily.len(), 2);
    assert_eq!(report.daily[0].temperature_celsius, 33.0);
    assert_eq!(report.daily[1].label.as_deref(), Some("Clouds"));

    let times: Vec<&str> = report.series.iter().map(|p| p.time.as_str()).collect();
    assert_eq!(times, ["00:00", "03:00", "00:00"]);
}

#[tokio::test]
async fn storm_alert_wins_over_heat_in_dark_mode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_body("Thunderstorm", 40.0)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "list": [] })),
        )
        .mount(&server)
        .await;

    let weather = Weather::new(&config_for(&server)).unwrap();
    let report = weather
        .lookup(
            &Location::Coordinates {
                latitude: 33.45,
                longitude: -112.07,
            },
            DisplayMode::Dark,
        )
        .await
        .unwrap();

    assert_eq!(report.alert.unwrap().message, THUNDERSTORM_MESSAGE);
    assert!(report.background.url().ends_with("?weather"));
    assert!(report.daily.is_empty());
    assert!(report.series.is_empty());
}

async fn mount_lookup(server: &MockServer, label: &str, temp: f64) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(label, temp)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(server)
        .await;
}

fn texts(result: &CallToolResult) -> Vec<String> {
    result
        .content
        .iter()
        .map(|content| content.as_text().unwrap().text.clone())
        .collect()
}

#[tokio::test]
async fn city_tool_returns_text_and_json_in_dark_mode() {
    let server = MockServer::start().await;
    mount_lookup(&server, "Rain", 18.0).await;

    let weather = Weather::new(&config_for(&server)).unwrap();
    let result = weather
        .get_weather_by_city(Parameters(GetWeatherByCityRequest {
            city: "Phoenix".into(),
            dark_mode: true,
        }))
        .await
        .unwrap();

    let texts = texts(&result);
    assert_eq!(texts.len(), 2);
    assert!(texts[0].starts_with("Phoenix, US\n"));
    assert!(texts[0].contains("Alert (info):"));

    let json: serde_json::Value = serde_json::from_str(&texts[1]).unwrap();
    assert!(json["background"].as_str().unwrap().ends_with("?weather"));
    assert_eq!(json["alert"]["severity"], "info");
    assert_eq!(json["daily"].as_array().unwrap().len(), 2);
    assert_eq!(json["series"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn coordinates_tool_keeps_condition_imagery_in_light_mode() {
    let server = MockServer::start().await;
    mount_lookup(&server, "Snow", -4.0).await;

    let weather = Weather::new(&config_for(&server)).unwrap();
    let result = weather
        .get_weather_by_coordinates(Parameters(GetWeatherByCoordinatesRequest {
            latitude: 33.45,
            longitude: -112.07,
            dark_mode: false,
        }))
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&texts(&result)[1]).unwrap();
    assert!(json["background"].as_str().unwrap().ends_with("?snow"));
}

#[tokio::test]
async fn blank_city_tool_call_is_invalid_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let weather = Weather::new(&config_for(&server)).unwrap();
    let err = weather
        .get_weather_by_city(Parameters(GetWeatherByCityRequest {
            city: "  ".into(),
            dark_mode: false,
        }))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "Please enter a city name.");
}

#[tokio::test]
async fn unknown_city_tool_call_is_invalid_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let weather = Weather::new(&config_for(&server)).unwrap();
    let err = weather
        .get_weather_by_city(Parameters(GetWeatherByCityRequest {
            city: "Atlantis".into(),
            dark_mode: false,
        }))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "City not found. Please try again.");
}

#[tokio::test]
async fn one_bad_forecast_record_keeps_the_rest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Clear", 20.0)))
        .mount(&server)
        .await;
    let mut body = forecast_body();
    let list = body["list"].as_array_mut().unwrap();
    list.insert(1, serde_json::json!({ "dt": "soon", "main": { "temp": 28.0 } }));
    list.insert(2, serde_json::json!({ "dt": 1719820800, "weather": [{ "main": "Clear" }] }));
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let weather = Weather::new(&config_for(&server)).unwrap();
    let report = weather
        .lookup(&Location::City("Phoenix".into()), DisplayMode::Light)
        .await
        .unwrap();

    assert_eq!(report.daily.len(), 2);
    assert_eq!(report.daily[0].temperature_celsius, 33.0);
    assert_eq!(report.series.len(), 3);
}
