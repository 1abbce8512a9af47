use std::time::Duration;

use drafter_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

async fn serve(at: &str, template: ResponseTemplate) -> (MockServer, String) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(template)
        .mount(&server)
        .await;
    let url = format!("{}{}", server.uri(), at);
    (server, url)
}

#[tokio::test]
async fn download_returns_bytes_and_metadata() {
    let (_server, url) = serve(
        "/renders/diagram.png",
        ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"),
    )
    .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let output = fetcher.fetch(&url).await.expect("fetch ok");

    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, output.metadata.original_url);
    assert_eq!(output.metadata.redirect_count, 0);
    assert_eq!(output.metadata.content_type.as_deref(), Some("image/png"));
    assert_eq!(output.bytes, PNG_BYTES);
    assert_eq!(output.metadata.byte_len, PNG_BYTES.len() as u64);
}

#[tokio::test]
async fn missing_image_yields_status_error() {
    let (_server, url) = serve("/renders/missing.png", ResponseTemplate::new(404)).await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let err = fetcher.fetch(&url).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.message, "404 Not Found");
}

#[tokio::test]
async fn non_image_content_type_is_refused() {
    let (_server, url) = serve(
        "/renders/page",
        ResponseTemplate::new(200).set_body_raw("<html>nope</html>", "text/html; charset=utf-8"),
    )
    .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let err = fetcher.fetch(&url).await.unwrap_err();

    // The error carries the header verbatim, parameters included.
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html; charset=utf-8".to_string()
        }
    );
}

#[tokio::test]
async fn slow_host_times_out() {
    let (_server, url) = serve(
        "/renders/slow.png",
        ResponseTemplate::new(200)
            .set_delay(Duration::from_millis(250))
            .set_body_raw(PNG_BYTES, "image/png"),
    )
    .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let err = fetcher.fetch(&url).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_image_is_refused_up_front() {
    // Content-Length already exceeds the cap, so no body is streamed.
    let (_server, url) = serve(
        "/renders/huge.png",
        ResponseTemplate::new(200)
            .insert_header("Content-Length", "11")
            .set_body_raw("01234567890", "image/png"),
    )
    .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let err = fetcher.fetch(&url).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn invalid_url_never_reaches_the_network() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let err = fetcher.fetch("not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
