use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use super::*;

fn request(text: &str, count: u32) -> PredictionRequest {
    PredictionRequest {
        text: text.to_string(),
        requested_count: count,
        generation: 1,
    }
}

/// Serve exactly one HTTP exchange on a loopback port and hand back the raw
/// request that was received.
fn serve_once(status: &str, body: &str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if request_complete(&raw) {
                break;
            }
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        String::from_utf8_lossy(&raw).into_owned()
    });
    (format!("http://{addr}/predict"), handle)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(head_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..head_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    raw.len() >= head_end + 4 + content_length
}

struct FailingBackend;

impl PredictionBackend for FailingBackend {
    fn predict(&self, _text: &str, _count: u32) -> Result<Vec<String>, PredictError> {
        Err(PredictError::Http("connection refused".to_string()))
    }
}

// --- Reply parsing ---

#[test]
fn test_parse_reply_ordered() {
    let got = parse_reply(r#"{"predictions": ["hello", "help", "helmet"]}"#).unwrap();
    assert_eq!(got, vec!["hello", "help", "helmet"]);
}

#[test]
fn test_parse_reply_missing_predictions_is_empty() {
    assert!(parse_reply("{}").unwrap().is_empty());
    assert!(parse_reply(r#"{"predictions": null}"#).unwrap().is_empty());
    assert!(parse_reply(r#"{"error": "model not loaded"}"#)
        .unwrap()
        .is_empty());
}

#[test]
fn test_parse_reply_malformed() {
    assert!(matches!(
        parse_reply("<html>oops</html>"),
        Err(PredictError::Decode(_))
    ));
    assert!(matches!(
        parse_reply(r#"{"predictions": [1, 2]}"#),
        Err(PredictError::Decode(_))
    ));
}

// --- fetch_candidates normalization ---

#[test]
fn test_fetch_failure_is_empty() {
    assert!(fetch_candidates(&FailingBackend, &request("hel", 3)).is_empty());
}

#[test]
fn test_fetch_fixture() {
    let backend = FixtureBackend::new([("hel", vec!["hello", "help", "helmet"])]);
    assert_eq!(
        fetch_candidates(&backend, &request("hel", 2)),
        vec!["hello", "help"]
    );
}

#[test]
fn test_fixture_falls_back_to_last_word() {
    let backend = FixtureBackend::from_json(r#"{"wor": ["world", "work"]}"#).unwrap();
    assert_eq!(
        backend.predict("hello wor", 5).unwrap(),
        vec!["world", "work"]
    );
    assert!(backend.predict("zzz", 5).unwrap().is_empty());
}

#[test]
fn test_fixture_bad_json() {
    assert!(matches!(
        FixtureBackend::from_json("[1, 2"),
        Err(PredictError::Fixture(_))
    ));
}

// --- HTTP backend ---

#[test]
fn test_http_success_sends_text_and_count() {
    let (url, server) = serve_once("200 OK", r#"{"predictions": ["hello", "help", "helmet"]}"#);
    let backend = HttpBackend::direct(&url, Duration::from_secs(5));

    let got = fetch_candidates(&backend, &request("hel", 3));
    assert_eq!(got, vec!["hello", "help", "helmet"]);

    let raw = server.join().unwrap();
    assert!(raw.starts_with("POST /predict"));
    let body = &raw[raw.find("\r\n\r\n").unwrap() + 4..];
    let sent: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(sent["text"], "hel");
    assert_eq!(sent["num_predictions"], 3);
}

#[test]
fn test_http_server_error_status() {
    let (url, server) = serve_once("500 Internal Server Error", r#"{"error": "boom"}"#);
    let backend = HttpBackend::direct(&url, Duration::from_secs(5));

    assert!(matches!(
        backend.predict("hel", 3),
        Err(PredictError::Status(500))
    ));
    server.join().unwrap();
}

#[test]
fn test_http_unreachable_is_empty() {
    // Bind then drop to get a loopback port nobody listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let backend = HttpBackend::direct(
        &format!("http://127.0.0.1:{port}/predict"),
        Duration::from_secs(2),
    );
    assert!(fetch_candidates(&backend, &request("hel", 3)).is_empty());
}
