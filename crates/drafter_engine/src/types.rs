use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Wire shape shared by both generation endpoints. Always arrives whole;
/// extra fields (the backend also returns `icon_category_list`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagramBundle {
    pub image_urls: Vec<String>,
    pub architectural_description: String,
    pub diagram_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Non-2xx response; the message is the server's `detail` field when the
    /// body carries one, otherwise the HTTP status line.
    #[error("{0}")]
    Api(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed response body: {0}")]
    Decode(String),
}

/// A downloaded diagram image plus what the transfer looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    /// The URL as the generation backend reported it.
    pub original_url: String,
    /// Where the bytes actually came from after redirects.
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// Why an image download failed. `message` keeps the transport detail for
/// the log; `kind` renders as the user-facing line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "the image URL is not valid"),
            FailureKind::HttpStatus(code) => write!(f, "the server answered with status {code}"),
            FailureKind::Timeout => write!(f, "the download timed out"),
            FailureKind::RedirectLimitExceeded => write!(f, "too many redirects"),
            FailureKind::TooLarge { max_bytes, .. } => {
                write!(f, "the image exceeds the {max_bytes} byte limit")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "the server sent {content_type} instead of an image")
            }
            FailureKind::Network => write!(f, "the connection failed"),
        }
    }
}

/// Completed engine work, polled by the UI thread. A result that arrives
/// after the issuing screen is gone is simply dropped by the receiver.
#[derive(Debug)]
pub enum EngineEvent {
    GenerationFinished(Result<DiagramBundle, ClientError>),
    CodeExecutionFinished(Result<DiagramBundle, ClientError>),
    PdfExtracted {
        path: PathBuf,
        result: Result<String, crate::pdf::PdfError>,
    },
    ImageFetched {
        index: usize,
        result: Result<FetchOutput, FetchError>,
    },
    ExportCompleted(Result<crate::export::ExportSummary, crate::export::ExportError>),
}
