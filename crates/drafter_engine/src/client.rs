use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::types::{ClientError, DiagramBundle};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const GENERATE_PATH: &str = "/api/v1/diagrams/generate";
const EXECUTE_CODE_PATH: &str = "/api/v1/diagrams/execute-code";

/// Settings for talking to the diagram generation service.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Generation runs an LLM pipeline server-side, so the ceiling is generous.
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
        }
    }
}

/// Boundary to the remote generation service. A trait so tests and the
/// engine can substitute canned responses for the real backend.
#[async_trait]
pub trait DiagramApi: Send + Sync {
    /// Submit a provider plus free-text description for diagram generation.
    async fn generate(
        &self,
        cloud_provider: &str,
        project_description: &str,
    ) -> Result<DiagramBundle, ClientError>;

    /// Re-run rendering with user-edited diagram code.
    async fn execute_code(
        &self,
        diagram_code: &str,
        architectural_description: &str,
    ) -> Result<DiagramBundle, ClientError>;
}

pub struct HttpDiagramApi {
    settings: ClientSettings,
}

impl HttpDiagramApi {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ClientError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|error| ClientError::Transport(error.to_string()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl DiagramApi for HttpDiagramApi {
    async fn generate(
        &self,
        cloud_provider: &str,
        project_description: &str,
    ) -> Result<DiagramBundle, ClientError> {
        let client = self.build_client()?;
        let form = reqwest::multipart::Form::new()
            .text("cloud_provider", cloud_provider.to_string())
            .text("project_description", project_description.to_string());
        let response = client
            .post(self.endpoint(GENERATE_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(map_send_error)?;
        decode_bundle(response).await
    }

    async fn execute_code(
        &self,
        diagram_code: &str,
        architectural_description: &str,
    ) -> Result<DiagramBundle, ClientError> {
        let client = self.build_client()?;
        let body = json!({
            "diagram_code": diagram_code,
            "architectural_description": architectural_description,
        });
        let response = client
            .post(self.endpoint(EXECUTE_CODE_PATH))
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;
        decode_bundle(response).await
    }
}

fn map_send_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Transport("request timed out".to_string())
    } else {
        ClientError::Transport(error.to_string())
    }
}

/// Reads the body once, then branches on status: non-2xx replies surface the
/// server's `detail` message so the UI can show it verbatim.
async fn decode_bundle(response: reqwest::Response) -> Result<DiagramBundle, ClientError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|error| ClientError::Transport(error.to_string()))?;
    if !status.is_success() {
        return Err(ClientError::Api(extract_detail(&body, status)));
    }
    serde_json::from_slice(&body).map_err(|error| ClientError::Decode(error.to_string()))
}

fn extract_detail(body: &[u8], status: reqwest::StatusCode) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: String,
    }
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.detail,
        Err(_) => status.to_string(),
    }
}
