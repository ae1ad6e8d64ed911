use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use cmw_core::ports::{ClockPort, VerificationFault, VerificationPort};
use cmw_core::{ContactInfo, Credentials, ErrorCode, Provider, VerificationOutcome};
use cmw_infra::WebhookVerifier;

struct FixedClock;

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        // 2026-10-18T09:30:00Z
        1_792_315_800_000
    }
}

fn verifier(url: &str) -> WebhookVerifier {
    WebhookVerifier::new(url, "help@agency.test", Arc::new(FixedClock)).expect("client builds")
}

fn contact() -> ContactInfo {
    ContactInfo {
        first_name: "John".into(),
        last_name: "Doe".into(),
        email: "john@example.com".into(),
        phone: "(555) 123-4567".into(),
    }
}

fn credentials() -> Credentials {
    Credentials::new(Provider::SmartCredit, "jdoe", "pw1234".into())
}

fn success_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "accountActive": true,
            "reportRetrieved": true,
            "reportUrl": "https://storage.example.com/reports/abc.pdf",
            "reportDate": "2026-10-18",
            "creditScore": {"transunion": 690, "experian": 701, "equifax": 688}
        },
        "message": "Report uploaded"
    })
}

#[tokio::test]
async fn posts_payload_and_decodes_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/verify")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "contactInfo": {"firstName": "John", "email": "john@example.com"},
            "credentials": {"provider": "smartcredit", "username": "jdoe", "password": "pw1234"},
            "metadata": {"timestamp": "2026-10-18T09:30:00.000Z"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success_body().to_string())
        .create_async()
        .await;

    let outcome = verifier(&format!("{}/verify", server.url()))
        .verify(&contact(), &credentials())
        .await
        .unwrap();

    mock.assert_async().await;
    match outcome {
        VerificationOutcome::Success { report, message } => {
            assert_eq!(report.credit_score.unwrap().summary(), "690 / 701 / 688");
            assert_eq!(message, "Report uploaded");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn server_reported_account_not_found_is_promoted() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(
            json!({
                "success": false,
                "error": {
                    "code": "ACCOUNT_NOT_FOUND",
                    "message": "inactive",
                    "userMessage": "No active account"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let outcome = verifier(&server.url())
        .verify(&contact(), &credentials())
        .await
        .unwrap();
    assert!(matches!(outcome, VerificationOutcome::AccountNotFound { .. }));
    assert_eq!(outcome.error().unwrap().user_message, "No active account");
}

#[tokio::test]
async fn account_not_found_without_message_is_still_promoted() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(
            json!({
                "success": false,
                "error": {"code": "ACCOUNT_NOT_FOUND", "userMessage": "No active account"}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let outcome = verifier(&server.url())
        .verify(&contact(), &credentials())
        .await
        .unwrap();
    assert!(matches!(outcome, VerificationOutcome::AccountNotFound { .. }));
    assert_eq!(outcome.error().unwrap().user_message, "No active account");
}

#[tokio::test]
async fn error_status_uses_server_envelope() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(429)
        .with_body(
            json!({"error": {"code": "RATE_LIMITED", "userMessage": "Please wait a minute."}})
                .to_string(),
        )
        .create_async()
        .await;

    let outcome = verifier(&server.url())
        .verify(&contact(), &credentials())
        .await
        .unwrap();
    let error = outcome.error().unwrap();
    assert_eq!(error.code.as_str(), "RATE_LIMITED");
    assert_eq!(error.message, "API request failed");
    assert_eq!(error.user_message, "Please wait a minute.");
    assert!(matches!(outcome, VerificationOutcome::Error { .. }));
}

#[tokio::test]
async fn error_status_with_unreadable_body_falls_back_to_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let outcome = verifier(&server.url())
        .verify(&contact(), &credentials())
        .await
        .unwrap();
    let error = outcome.error().unwrap();
    assert_eq!(error.code, ErrorCode::ApiError);
    assert_eq!(error.user_message, "Something went wrong. Please try again.");
}

#[tokio::test]
async fn undecodable_success_body_is_a_fault() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let result = verifier(&server.url())
        .verify(&contact(), &credentials())
        .await;
    assert!(matches!(result, Err(VerificationFault::MalformedResponse(_))));
}

#[tokio::test]
async fn slow_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        // Accept and hold the connection without ever answering.
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let outcome = verifier(&format!("http://{addr}/"))
        .with_timeout(Duration::from_millis(200))
        .verify(&contact(), &credentials())
        .await
        .unwrap();
    assert_eq!(outcome.code(), Some(&ErrorCode::Timeout));
}

#[tokio::test]
async fn transport_failure_is_retried_once_then_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&accepted);
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            drop(stream);
        }
    });

    let outcome = verifier(&format!("http://{addr}/"))
        .verify(&contact(), &credentials())
        .await
        .unwrap();

    assert_eq!(accepted.load(Ordering::SeqCst), 2);
    let error = outcome.error().unwrap();
    assert_eq!(error.code, ErrorCode::NetworkError);
    assert_eq!(error.support_email.as_deref(), Some("help@agency.test"));
}

#[tokio::test]
async fn retry_success_is_used() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (first, _) = listener.accept().await.unwrap();
        drop(first);

        let (mut second, _) = listener.accept().await.unwrap();
        read_request(&mut second).await;
        let body = success_body().to_string();
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        second.write_all(response.as_bytes()).await.unwrap();
        second.shutdown().await.ok();
    });

    let outcome = verifier(&format!("http://{addr}/"))
        .verify(&contact(), &credentials())
        .await
        .unwrap();
    assert!(outcome.is_success());
}

/// Read one HTTP request (headers plus `content-length` body).
async fn read_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
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
                return;
            }
        }
    }
}
