//! HTTP client tests
//!
//! Runs the forecast and Pushover clients against a minimal local HTTP
//! server to check the requests they send and how they read responses.

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use weather_alert_service::external::{
    ForecastSource, OpenWeatherClient, PushTransport, PushoverClient, PushoverMessage,
};
use weather_alert_service::services::RetryPolicy;

// ============================================================================
// Test Server
// ============================================================================

/// Serve one canned response per connection, in order, and hand back the
/// raw requests that were received.
async fn serve(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut stream).await);

            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                if status == 200 { "OK" } else { "Error" },
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        }
        requests
    });

    (base_url, handle)
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn forecast_client(base_url: String) -> OpenWeatherClient {
    OpenWeatherClient::with_base_url("test_api_key".to_string(), "TestCity".to_string(), base_url)
        .with_timeout(Duration::from_secs(5))
        .with_retry_policy(RetryPolicy::immediate(3))
}

// ============================================================================
// Forecast Client
// ============================================================================

#[tokio::test]
async fn test_fetch_forecast_success() {
    let body = r#"{"city":{"name":"TestCity"},"list":[{"main":{"temp":41},"wind":{"speed":5},"weather":[]}]}"#;
    let (base_url, server) = serve(vec![(200, body.to_string())]).await;

    let forecast = forecast_client(base_url).fetch().await;

    let forecast = forecast.expect("forecast should be returned");
    assert_eq!(forecast.list.unwrap().len(), 1);

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 1);
    let request_line = requests[0].lines().next().unwrap();
    assert!(request_line.starts_with("GET /forecast?"));
    assert!(request_line.contains("q=TestCity"));
    assert!(request_line.contains("appid=test_api_key"));
    assert!(request_line.contains("units=metric"));
}

#[tokio::test]
async fn test_fetch_forecast_with_empty_list() {
    let (base_url, server) = serve(vec![(200, r#"{"list":[]}"#.to_string())]).await;

    let forecast = forecast_client(base_url).fetch().await;

    assert!(forecast.is_some());
    server.await.unwrap();
}

#[tokio::test]
async fn test_fetch_forecast_retries_then_succeeds() {
    let (base_url, server) = serve(vec![
        (500, r#"{"message":"internal"}"#.to_string()),
        (200, r#"{"list":[]}"#.to_string()),
    ])
    .await;

    let forecast = forecast_client(base_url).fetch().await;

    assert!(forecast.is_some());
    assert_eq!(server.await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_fetch_forecast_gives_up_after_three_attempts() {
    let (base_url, server) = serve(vec![
        (401, r#"{"message":"invalid key"}"#.to_string()),
        (401, r#"{"message":"invalid key"}"#.to_string()),
        (401, r#"{"message":"invalid key"}"#.to_string()),
    ])
    .await;

    let forecast = forecast_client(base_url).fetch().await;

    assert!(forecast.is_none());
    assert_eq!(server.await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_fetch_forecast_malformed_body_is_absent() {
    let bad = r#"{"list":[{"main":{}}]}"#.to_string();
    let (base_url, server) = serve(vec![(200, bad.clone()), (200, bad.clone()), (200, bad)]).await;

    let forecast = forecast_client(base_url).fetch().await;

    assert!(forecast.is_none());
    server.await.unwrap();
}

// ============================================================================
// Pushover Client
// ============================================================================

fn message() -> PushoverMessage {
    PushoverMessage {
        token: "test_app_token".to_string(),
        user: "test_user_key".to_string(),
        message: "Extreme Heat".to_string(),
        title: "Weather Alert System".to_string(),
    }
}

#[tokio::test]
async fn test_pushover_posts_form() {
    let (base_url, server) = serve(vec![(200, r#"{"status":1}"#.to_string())]).await;
    let client = PushoverClient::with_base_url(base_url);

    let status = client.send(&message()).await.unwrap();

    assert_eq!(status, 200);
    let requests = server.await.unwrap();
    let request = &requests[0];
    assert!(request.starts_with("POST /1/messages.json"));
    assert!(request
        .to_lowercase()
        .contains("content-type: application/x-www-form-urlencoded"));
    assert!(request.ends_with(
        "token=test_app_token&user=test_user_key&message=Extreme+Heat&title=Weather+Alert+System"
    ));
}

#[tokio::test]
async fn test_pushover_reports_error_status() {
    let (base_url, server) = serve(vec![(400, r#"{"status":0}"#.to_string())]).await;
    let client = PushoverClient::with_base_url(base_url);

    assert_eq!(client.send(&message()).await.unwrap(), 400);
    server.await.unwrap();
}

#[tokio::test]
async fn test_pushover_unreachable_is_error() {
    let client = PushoverClient::with_base_url("http://127.0.0.1:1".to_string())
        .with_timeout(Duration::from_secs(1));

    assert!(client.send(&message()).await.is_err());
}
