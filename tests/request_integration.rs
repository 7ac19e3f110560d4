//! Integration tests for the request/delivery cycle.
//!
//! These tests verify the full send flow with mock HTTP servers: body
//! framing as observed by the server, header handling, and the
//! exactly-once delivery contract.

use std::collections::HashMap;
use std::sync::mpsc;

use multipart_post::{
    ErrorHook, MultipartRequest, Part, ParsedResponse, RequestError, RequestSender, ResponseHook,
};
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Outcome captured from a request's delivery hooks.
#[derive(Debug)]
enum Outcome {
    Success(ParsedResponse),
    Failure(RequestError),
}

/// Builds a hook pair that forwards the single delivered outcome to a channel.
fn channel_hooks() -> (ResponseHook, ErrorHook, mpsc::Receiver<Outcome>) {
    let (sender, receiver) = mpsc::channel();
    let error_sender = sender.clone();
    (
        Box::new(move |response| {
            sender
                .send(Outcome::Success(response))
                .expect("test receiver alive")
        }),
        Box::new(move |error| {
            error_sender
                .send(Outcome::Failure(error))
                .expect("test receiver alive")
        }),
        receiver,
    )
}

/// Matches requests whose Content-Type is multipart/form-data and whose
/// body is framed by exactly the boundary the header declares.
struct MultipartFramingMatcher;

impl Match for MultipartFramingMatcher {
    fn matches(&self, request: &Request) -> bool {
        let Some(content_type) = request
            .headers
            .get("Content-Type")
            .and_then(|v| v.to_str().ok())
        else {
            return false;
        };
        let Some(boundary) = content_type.strip_prefix("multipart/form-data;boundary=") else {
            return false;
        };
        request
            .body
            .starts_with(format!("--{boundary}\r\n").as_bytes())
            && request
                .body
                .ends_with(format!("--{boundary}--\r\n").as_bytes())
    }
}

/// Matches requests whose body contains the given byte sequence.
struct BodyContainsMatcher(Vec<u8>);

impl Match for BodyContainsMatcher {
    fn matches(&self, request: &Request) -> bool {
        request
            .body
            .windows(self.0.len())
            .any(|window| window == self.0.as_slice())
    }
}

fn two_part_request(url: &str) -> (MultipartRequest, mpsc::Receiver<Outcome>) {
    let (on_response, on_error, receiver) = channel_hooks();
    let mut request =
        MultipartRequest::new(url, None, on_response, on_error).expect("valid URL");
    request.add_part(Part::form("field1", "value1"));
    request.add_part(Part::file("file1", "text/plain", Some("a.txt"), b"hi".to_vec()));
    (request, receiver)
}

#[tokio::test]
async fn test_send_delivers_success_with_raw_body_passthrough() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Cache-Control", "max-age=60")
                .insert_header("ETag", "\"v7\"")
                .set_body_bytes(b"stored"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/upload", mock_server.uri());
    let (mut request, receiver) = two_part_request(&url);

    RequestSender::new().send(&mut request).await;

    match receiver.try_recv().expect("an outcome must be delivered") {
        Outcome::Success(parsed) => {
            assert_eq!(parsed.response.status, 200);
            assert_eq!(
                parsed.response.data, b"stored",
                "response bytes must pass through unchanged"
            );
            let cache = parsed.cache.expect("max-age response is cacheable");
            assert_eq!(cache.etag.as_deref(), Some("\"v7\""));
        }
        other => panic!("Expected success outcome, got: {other:?}"),
    }
    assert!(receiver.try_recv().is_err(), "exactly one outcome per send");
}

#[tokio::test]
async fn test_server_receives_well_framed_multipart_body() {
    let mock_server = MockServer::start().await;

    let form_block =
        b"Content-Disposition: form-data; name=\"field1\"\r\n\r\nvalue1\r\n".to_vec();
    let file_block = b"Content-Disposition: form-data; name=\"file1\"; filename=\"a.txt\"\r\n\
        Content-type: text/plain\r\n\r\nhi\r\n"
        .to_vec();

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(MultipartFramingMatcher)
        .and(BodyContainsMatcher(form_block))
        .and(BodyContainsMatcher(file_block))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/upload", mock_server.uri());
    let (mut request, receiver) = two_part_request(&url);

    RequestSender::new().send(&mut request).await;

    assert!(
        matches!(receiver.try_recv(), Ok(Outcome::Success(_))),
        "a correctly framed body must be accepted by the server"
    );
}

#[tokio::test]
async fn test_server_error_delivers_error_exactly_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let url = format!("{}/upload", mock_server.uri());
    let (mut request, receiver) = two_part_request(&url);

    RequestSender::new().send(&mut request).await;

    match receiver.try_recv().expect("an outcome must be delivered") {
        Outcome::Failure(RequestError::HttpStatus { status, .. }) => assert_eq!(status, 500),
        other => panic!("Expected HttpStatus failure, got: {other:?}"),
    }
    assert!(receiver.try_recv().is_err(), "exactly one outcome per send");
}

#[tokio::test]
async fn test_rate_limit_error_carries_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "120"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/upload", mock_server.uri());
    let (mut request, receiver) = two_part_request(&url);

    RequestSender::new().send(&mut request).await;

    match receiver.try_recv().expect("an outcome must be delivered") {
        Outcome::Failure(RequestError::HttpStatus {
            status,
            retry_after,
            ..
        }) => {
            assert_eq!(status, 429);
            assert_eq!(retry_after.as_deref(), Some("120"));
        }
        other => panic!("Expected HttpStatus failure, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_failure_delivers_network_error() {
    // Nothing listens on the discard port; the connection is refused.
    let (mut request, receiver) = two_part_request("http://127.0.0.1:9/upload");

    RequestSender::new().send(&mut request).await;

    match receiver.try_recv().expect("an outcome must be delivered") {
        Outcome::Failure(RequestError::Network { .. } | RequestError::Timeout { .. }) => {}
        other => panic!("Expected network failure, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_resending_completed_request_does_not_redeliver() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let url = format!("{}/upload", mock_server.uri());
    let (mut request, receiver) = two_part_request(&url);
    let sender = RequestSender::new();

    sender.send(&mut request).await;
    sender.send(&mut request).await;

    assert!(matches!(receiver.try_recv(), Ok(Outcome::Success(_))));
    assert!(
        receiver.try_recv().is_err(),
        "hooks must not fire again for an already-delivered request"
    );
}

#[tokio::test]
async fn test_caller_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(wiremock::matchers::header("X-Auth", "token-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/upload", mock_server.uri());
    let (on_response, on_error, receiver) = channel_hooks();
    let headers = HashMap::from([("X-Auth".to_string(), "token-1".to_string())]);
    let mut request =
        MultipartRequest::new(&url, Some(headers), on_response, on_error).expect("valid URL");
    request.add_part(Part::form("field1", "value1"));

    RequestSender::new().send(&mut request).await;

    assert!(matches!(receiver.try_recv(), Ok(Outcome::Success(_))));
}

#[tokio::test]
async fn test_default_user_agent_sent_without_header_overrides() {
    /// Matches requests whose User-Agent identifies this library.
    struct LibraryUaMatcher;

    impl Match for LibraryUaMatcher {
        fn matches(&self, request: &Request) -> bool {
            request
                .headers
                .get("User-Agent")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|ua| ua.starts_with("multipart-post/"))
        }
    }

    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(LibraryUaMatcher)
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/upload", mock_server.uri());
    let (mut request, receiver) = two_part_request(&url);

    RequestSender::new().send(&mut request).await;

    assert!(matches!(receiver.try_recv(), Ok(Outcome::Success(_))));
}

#[tokio::test]
async fn test_malformed_cache_header_delivers_parse_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).insert_header("Cache-Control", "max-age=soon"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/upload", mock_server.uri());
    let (mut request, receiver) = two_part_request(&url);

    RequestSender::new().send(&mut request).await;

    match receiver.try_recv().expect("an outcome must be delivered") {
        Outcome::Failure(RequestError::Parse { .. }) => {}
        other => panic!("Expected parse failure, got: {other:?}"),
    }
    assert!(receiver.try_recv().is_err(), "exactly one outcome per send");
}

#[tokio::test]
async fn test_binary_file_payload_survives_the_wire() {
    // Payload includes CRLF pairs and non-ASCII bytes; the server-side
    // body must embed them verbatim between the part headers and the
    // part's trailing CRLF.
    let payload: Vec<u8> = vec![0, 13, 10, 13, 10, 255, 128, 7];
    let mut expected_block = b"Content-type: application/octet-stream\r\n\r\n".to_vec();
    expected_block.extend_from_slice(&payload);
    expected_block.extend_from_slice(b"\r\n");

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(BodyContainsMatcher(expected_block))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/upload", mock_server.uri());
    let (on_response, on_error, receiver) = channel_hooks();
    let mut request = MultipartRequest::new(&url, None, on_response, on_error).expect("valid URL");
    request.add_part(Part::file(
        "blob",
        "application/octet-stream",
        Some("blob.bin"),
        payload,
    ));

    RequestSender::new().send(&mut request).await;

    assert!(
        matches!(receiver.try_recv(), Ok(Outcome::Success(_))),
        "binary payload must reach the server byte-for-byte"
    );
}
