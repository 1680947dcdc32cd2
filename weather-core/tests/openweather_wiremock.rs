//! HTTP behaviour of the OpenWeather client and IP geolocator against a
//! mock server.

use chrono::Utc;
use weather_core::{
    Coordinates, Dashboard, DashboardState, GeolocationError, Geolocator, LocationQuery, Units,
    WeatherError, WeatherSource,
    error::{Endpoint, FETCH_FAILED_MESSAGE},
    location::{self, IpGeolocator, LOOKUP_FAILED_ADVISORY},
    provider::openweather::OpenWeatherClient,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 72.8777, "lat": 19.076},
        "weather": [{"id": 501, "main": "Rain", "description": "moderate rain", "icon": "10d"}],
        "main": {"temp": 27.5, "feels_like": 31.2, "temp_min": 27.0, "temp_max": 28.1, "humidity": 89},
        "wind": {"speed": 6.7, "deg": 240},
        "sys": {"country": "IN"},
        "name": "Mumbai",
        "cod": 200
    })
}

/// 16 intervals, 3 hours apart, starting 2024-06-01T00:00Z: two calendar days.
fn forecast_body() -> serde_json::Value {
    let list: Vec<_> = (0..16_i64)
        .map(|i| {
            let main = if i < 8 { "Rain" } else { "Clouds" };
            serde_json::json!({
                "dt": 1_717_200_000 + i * 10_800,
                "main": {"temp": 27.0, "temp_min": 25.5 + i as f64 * 0.1, "temp_max": 29.4},
                "weather": [{"main": main, "icon": "10d"}],
                "wind": {"speed": 5.0}
            })
        })
        .collect();

    serde_json::json!({"cod": "200", "cnt": list.len(), "list": list, "city": {"name": "Mumbai", "country": "IN"}})
}

fn client(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::new("TEST_KEY".into(), server.uri(), Units::Metric)
}

async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Fetcher
// ============================================================================

#[tokio::test]
async fn city_query_sends_name_units_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Mumbai"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client(&server)
        .current(&LocationQuery::City("Mumbai".into()))
        .await
        .unwrap();

    assert_eq!(payload.name, "Mumbai");
    assert_eq!(payload.main.humidity, 89.0);
}

#[tokio::test]
async fn coordinate_query_sends_lat_and_lon() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "19.076"))
        .and(query_param("lon", "72.8777"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let query = LocationQuery::Coordinates(Coordinates::new(19.076, 72.8777));
    let payload = client(&server).forecast(&query).await.unwrap();

    assert_eq!(payload.list.len(), 16);
}

#[tokio::test]
async fn imperial_units_are_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new("K".into(), server.uri(), Units::Imperial);
    assert!(client.current(&LocationQuery::City("Mumbai".into())).await.is_ok());
}

#[tokio::test]
async fn not_found_is_reported_with_status_and_body() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(404).set_body_string(r#"{"cod":"404","message":"city not found"}"#),
    )
    .await;

    let result = client(&server)
        .current(&LocationQuery::City("Atlantis".into()))
        .await;

    match result {
        Err(WeatherError::Status {
            endpoint,
            status,
            body,
        }) => {
            assert_eq!(endpoint, Endpoint::Current);
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("city not found"));
        }
        other => panic!("Expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn invalid_json_is_malformed() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/forecast",
        ResponseTemplate::new(200).set_body_string("not valid json"),
    )
    .await;

    let result = client(&server)
        .forecast(&LocationQuery::City("Mumbai".into()))
        .await;

    assert!(
        matches!(
            result,
            Err(WeatherError::Malformed {
                endpoint: Endpoint::Forecast,
                ..
            })
        ),
        "Expected Malformed, got: {result:?}"
    );
}

#[tokio::test]
async fn missing_main_block_is_malformed() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Mumbai",
            "sys": {"country": "IN"},
            "wind": {"speed": 1.0},
            "weather": [{"main": "Clear", "icon": "01d"}]
        })),
    )
    .await;

    let result = client(&server)
        .current(&LocationQuery::City("Mumbai".into()))
        .await;

    assert!(matches!(result, Err(WeatherError::Malformed { .. })));
}

// ============================================================================
// Full cycle
// ============================================================================

#[tokio::test]
async fn successful_cycle_loads_dashboard() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(current_body()),
    )
    .await;
    mount(
        &server,
        "/forecast",
        ResponseTemplate::new(200).set_body_json(forecast_body()),
    )
    .await;

    let mut dash = Dashboard::new();
    dash.refresh(&client(&server), &LocationQuery::City("Mumbai".into()), &Utc)
        .await;

    let vm = dash.view_model().expect("dashboard should be loaded");
    assert_eq!(vm.location, "Mumbai, IN");
    assert_eq!(vm.current.temperature, 28);
    assert_eq!(vm.current.wind_speed, 7);
    assert_eq!(vm.forecast.len(), 2);
    assert_eq!(vm.forecast[0].date, "6/1/2024");
    assert_eq!(vm.forecast[0].condition_main, "Rain");
    assert_eq!(vm.forecast[0].low, 26);
    assert_eq!(vm.forecast[1].condition_main, "Clouds");
    assert_eq!(dash.backdrop(), weather_core::Backdrop::Rain);
}

#[tokio::test]
async fn current_failure_fails_whole_cycle() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;
    mount(
        &server,
        "/forecast",
        ResponseTemplate::new(200).set_body_json(forecast_body()),
    )
    .await;

    let mut dash = Dashboard::new();
    let state = dash
        .refresh(&client(&server), &LocationQuery::City("Mumbai".into()), &Utc)
        .await;

    assert_eq!(
        state,
        &DashboardState::Failed(FETCH_FAILED_MESSAGE.to_string())
    );
    assert!(dash.view_model().is_none());
}

// ============================================================================
// Geolocation
// ============================================================================

#[tokio::test]
async fn ip_geolocator_reads_coordinates() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/json",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "country": "Norway",
            "city": "Oslo",
            "lat": 59.9133,
            "lon": 10.7389
        })),
    )
    .await;

    let geo = IpGeolocator::new(format!("{}/json", server.uri()));
    let coords = geo.locate().await.unwrap();

    assert_eq!(coords, Coordinates::new(59.9133, 10.7389));
}

#[tokio::test]
async fn ip_geolocator_failure_status_is_unavailable() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/json",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "reserved range"
        })),
    )
    .await;

    let geo = IpGeolocator::new(format!("{}/json", server.uri()));
    let err = geo.locate().await.unwrap_err();

    assert_eq!(err, GeolocationError::Unavailable("reserved range".into()));
}

#[tokio::test]
async fn detection_uses_weather_endpoint_for_city_name() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/json",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success", "lat": 19.076, "lon": 72.8777
        })),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "19.076"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let geo = IpGeolocator::new(format!("{}/json", server.uri()));
    let res = location::detect(&geo, &client(&server)).await;

    assert_eq!(res.label, "Mumbai");
    assert_eq!(
        res.query,
        LocationQuery::Coordinates(Coordinates::new(19.076, 72.8777))
    );
    assert!(res.advisory.is_none());
}

#[tokio::test]
async fn detection_falls_back_when_city_lookup_fails() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/json",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success", "lat": 40.7128, "lon": -74.006
        })),
    )
    .await;
    mount(&server, "/weather", ResponseTemplate::new(401)).await;

    let geo = IpGeolocator::new(format!("{}/json", server.uri()));
    let res = location::detect(&geo, &client(&server)).await;

    assert_eq!(res.label, "Mumbai");
    assert_eq!(
        res.advisory.map(|a| a.to_string()).as_deref(),
        Some(LOOKUP_FAILED_ADVISORY)
    );
}

#[tokio::test]
async fn position_without_country_keeps_detected_city() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/json",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success", "lat": -33.9, "lon": 18.4
        })),
    )
    .await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "weather": [{"main": "Clear", "icon": "01d"}],
            "main": {"temp": 19.6, "humidity": 71},
            "wind": {"speed": 8.2},
            "sys": {"sunrise": 1717221600},
            "name": "Sea Point"
        })),
    )
    .await;
    mount(
        &server,
        "/forecast",
        ResponseTemplate::new(200).set_body_json(forecast_body()),
    )
    .await;

    let source = client(&server);
    let geo = IpGeolocator::new(format!("{}/json", server.uri()));
    let res = location::detect(&geo, &source).await;

    assert_eq!(res.label, "Sea Point");
    assert!(res.advisory.is_none());

    let mut dash = Dashboard::new();
    dash.refresh(&source, &res.query, &Utc).await;

    let vm = dash.view_model().expect("dashboard should be loaded");
    assert_eq!(vm.location, "Sea Point");
    assert_eq!(vm.current.humidity_pct, 71);
}
