use booking_cascade::core::BookingApi;
use booking_cascade::domain::model::ServiceOption;
use booking_cascade::utils::error::ErrorKind;
use booking_cascade::HttpBookingApi;
use httpmock::prelude::*;
use std::time::Duration;

#[tokio::test]
async fn test_fetch_services_with_mixed_id_types() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/servicos")
            .query_param("professional_id", "5");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "services": [
                    {"id": 1, "name": "Corte"},
                    {"id": "2", "name": "Barba"}
                ]
            }));
    });

    let api = HttpBookingApi::new(&server.base_url()).unwrap();
    let services = api.fetch_services("5").await.unwrap();

    api_mock.assert();
    assert_eq!(
        services,
        vec![ServiceOption::new("1", "Corte"), ServiceOption::new("2", "Barba")]
    );
}

#[tokio::test]
async fn test_missing_list_keys_are_empty() {
    let server = MockServer::start();
    let services_mock = server.mock(|when, then| {
        when.method(GET).path("/api/servicos");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({}));
    });
    let slots_mock = server.mock(|when, then| {
        when.method(GET).path("/api/horarios");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"slots": null}));
    });

    let api = HttpBookingApi::new(&server.base_url()).unwrap();

    assert!(api.fetch_services("5").await.unwrap().is_empty());
    assert!(api.fetch_slots("01/06/2024", "5").await.unwrap().is_empty());
    services_mock.assert();
    slots_mock.assert();
}

#[tokio::test]
async fn test_fetch_slots_sends_encoded_parameters() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/horarios")
            .query_param("date", "01/06/2024")
            .query_param("professional_id", "5");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"slots": ["09:00", "10:00"]}));
    });

    let api = HttpBookingApi::new(&server.base_url()).unwrap();
    let slots = api.fetch_slots("01/06/2024", "5").await.unwrap();

    api_mock.assert();
    assert_eq!(slots, vec!["09:00".to_string(), "10:00".to_string()]);
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/servicos");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html><body>Login</body></html>");
    });

    let api = HttpBookingApi::new(&server.base_url()).unwrap();
    let err = api.fetch_services("5").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_server_error_is_transport_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/horarios");
        then.status(500);
    });

    let api = HttpBookingApi::new(&server.base_url()).unwrap();
    let err = api.fetch_slots("01/06/2024", "5").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_failure() {
    let api = HttpBookingApi::new("http://127.0.0.1:1")
        .unwrap()
        .with_timeout(Some(Duration::from_secs(2)));

    let err = api.fetch_services("5").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_request_timeout_applies() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/servicos");
        then.status(200)
            .delay(Duration::from_millis(1500))
            .json_body(serde_json::json!({"services": []}));
    });

    let api = HttpBookingApi::new(&server.base_url())
        .unwrap()
        .with_timeout(Some(Duration::from_millis(200)));

    let err = api.fetch_services("5").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
