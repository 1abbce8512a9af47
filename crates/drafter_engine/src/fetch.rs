use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

/// Download policy for diagram image URLs. The defaults fit the rendered
/// PNG/JPEG/SVG links the generation backend hands out.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 10 * 1024 * 1024,
            allowed_content_types: vec![
                "image/png".to_string(),
                "image/jpeg".to_string(),
                "image/svg+xml".to_string(),
            ],
        }
    }
}

/// Downloads one rendered diagram image. Separate from the generation client
/// because image hosts may sit behind redirects and need size policing.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let target = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        // The hop count is observed through the redirect policy closure;
        // reqwest does not expose it on the response.
        let hops = Arc::new(AtomicUsize::new(0));
        let client = build_client(&self.settings, hops.clone())?;

        let response = client.get(target).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let declared_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if let Some(raw) = declared_type.as_deref() {
            if !type_allowed(&self.settings.allowed_content_types, raw) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: raw.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        if let Some(declared_len) = response.content_length() {
            if declared_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, declared_len));
            }
        }

        let final_url = response.url().to_string();
        let body = read_capped(response, self.settings.max_bytes).await?;

        Ok(FetchOutput {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url,
                redirect_count: hops.load(Ordering::Relaxed),
                content_type: declared_type,
                byte_len: body.len() as u64,
            },
            bytes: body,
        })
    }
}

fn build_client(
    settings: &FetchSettings,
    hops: Arc<AtomicUsize>,
) -> Result<reqwest::Client, FetchError> {
    let limit = settings.redirect_limit;
    let policy = redirect::Policy::custom(move |attempt| {
        let followed = attempt.previous().len();
        hops.store(followed, Ordering::Relaxed);
        if followed >= limit {
            attempt.error("redirect limit exceeded")
        } else {
            attempt.follow()
        }
    });

    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .redirect(policy)
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

/// The allow-list matches on the media type alone; parameters such as
/// charset are ignored. The error reports the header verbatim.
fn type_allowed(allowed: &[String], header: &str) -> bool {
    let media_type = header.split(';').next().unwrap_or(header).trim();
    allowed
        .iter()
        .any(|entry| entry.eq_ignore_ascii_case(media_type))
}

/// Streams the body, abandoning the download once the running total passes
/// the cap. Content-Length is advisory; this is the authoritative guard.
async fn read_capped(response: reqwest::Response, max_bytes: u64) -> Result<Vec<u8>, FetchError> {
    let mut collected = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(classify)?;
        let running = collected.len() as u64 + chunk.len() as u64;
        if running > max_bytes {
            return Err(too_large(max_bytes, running));
        }
        collected.extend_from_slice(&chunk);
    }
    Ok(collected)
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::new(FailureKind::Timeout, err.to_string())
    } else if err.is_redirect() {
        FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string())
    } else {
        FetchError::new(FailureKind::Network, err.to_string())
    }
}
