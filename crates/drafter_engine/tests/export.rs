use std::fs;

use drafter_engine::{export_all, export_image, ExportError, FetchSettings, ReqwestFetcher};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";
const OTHER_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nother-image-data";

#[tokio::test]
async fn export_saves_bytes_verbatim_under_chosen_extension() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/diagram.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/diagram.png", server.uri());

    // Choosing "jpg" relabels the download; the bytes are not re-encoded.
    let summary = export_image(&fetcher, temp.path(), &url, "jpg")
        .await
        .expect("export ok");
    assert_eq!(summary.files_written, 1);
    assert_eq!(summary.directory, temp.path());

    let written = fs::read(temp.path().join("architecture-diagram.jpg")).unwrap();
    assert_eq!(written, PNG_BYTES);
}

#[tokio::test]
async fn export_all_numbers_files_in_carousel_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/one.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/two.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(OTHER_BYTES, "image/png"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let urls = vec![
        format!("{}/one.png", server.uri()),
        format!("{}/two.png", server.uri()),
    ];

    let summary = export_all(&fetcher, temp.path(), &urls, "png")
        .await
        .expect("export ok");
    assert_eq!(summary.files_written, 2);

    let first = fs::read(temp.path().join("architecture-diagram-1.png")).unwrap();
    let second = fs::read(temp.path().join("architecture-diagram-2.png")).unwrap();
    assert_eq!(first, PNG_BYTES);
    assert_eq!(second, OTHER_BYTES);
}

#[tokio::test]
async fn export_all_stops_at_first_failed_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/one.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let broken = format!("{}/gone.png", server.uri());
    let urls = vec![format!("{}/one.png", server.uri()), broken.clone()];

    let err = export_all(&fetcher, temp.path(), &urls, "png")
        .await
        .unwrap_err();
    match err {
        ExportError::Download { url, .. } => assert_eq!(url, broken),
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(temp.path().join("architecture-diagram-1.png").exists());
    assert!(!temp.path().join("architecture-diagram-2.png").exists());
}
