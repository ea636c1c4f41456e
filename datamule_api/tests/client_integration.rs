use std::time::Duration;

use datamule_api::{Client, Error};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn client_for(server: &MockServer) -> Client {
    Client::with_base_url(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetch_csv_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("ipo_overview.csv");

    Mock::given(method("GET"))
        .and(path("/ipo/overview.csv"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(&body)
                .insert_header("content-type", "text/csv"),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let text = client.fetch_csv("ipo/overview.csv").await.unwrap();
    assert_eq!(text, body);
}

#[tokio::test]
async fn fetch_csv_absolute_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elsewhere.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("filing_date,count,component\n"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url("http://127.0.0.1:9/unused/", Duration::from_secs(5))
        .unwrap();
    let url = format!("{}/elsewhere.csv", mock_server.uri());
    let text = client.fetch_csv(&url).await.unwrap();
    assert!(text.starts_with("filing_date"));
}

#[tokio::test]
async fn fetch_csv_not_found_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing.csv"))
        .respond_with(ResponseTemplate::new(404).set_body_string("404: Not Found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.fetch_csv("missing.csv").await.unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "404: Not Found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn fetch_csv_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken.csv"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.fetch_csv("broken.csv").await;
    assert!(matches!(result, Err(Error::HttpStatus { status: 500, .. })));
}

#[tokio::test]
async fn fetch_csv_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow.csv"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("filing_date,count,component\n")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), Duration::from_millis(200)).unwrap();
    let err = client.fetch_csv("slow.csv").await.unwrap_err();
    match err {
        Error::RequestFailed(cause) => assert!(cause.contains("timed out"), "cause: {}", cause),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn fetch_json_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/chains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "Ethereum", "tvl": 45000000000.0},
            {"name": "Solana", "tvl": 8000000000.0}
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let value = client
        .fetch_json(&format!("{}/v2/chains", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[0]["name"], "Ethereum");
}

#[tokio::test]
async fn fetch_json_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/chains"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .fetch_json(&format!("{}/v2/chains", mock_server.uri()))
        .await;
    assert!(matches!(result, Err(Error::InvalidBody(_))));
}
