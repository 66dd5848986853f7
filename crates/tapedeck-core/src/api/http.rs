//! reqwest implementation of the recordings backend.
//!
//! All endpoints share the same response handling:
//! - non-success status: the body's `detail` or `message` field (FastAPI style)
//!   becomes [`ConsoleError::Server`], falling back to the raw body text
//! - success: the body is decoded as JSON; decoding failures are
//!   [`ConsoleError::InvalidResponse`]

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use super::client::get_http_client;
use super::{
    DELETE_PATH, DETAILS_PATH, LIST_PATH, PATTERNS_PATH, RecordingsBackend, STREAM_PATH,
    UPLOAD_PATH,
};
use crate::error::{ConsoleError, Result};
use crate::model::{
    DetailResponse, ListResponse, MessageResponse, PatternRequest, PatternResponse, RecordingId,
    UploadRequest,
};
use crate::settings::{Settings, normalize_server_url};
use crate::state::ListQuery;

/// Backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpBackend {
    /// Create a backend for a server base URL (validated and normalized).
    ///
    /// Backends share one connection pool but each applies its own timeout.
    pub fn new(server_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = normalize_server_url(server_url)?;
        let client = get_http_client()?.clone();
        Ok(Self {
            client,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.server_url, settings.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        endpoint_url(&self.base_url, segments)
    }

    /// Stream `/serve-audio/{id}` into a file, returning the number of bytes written
    pub async fn download_audio(&self, id: &RecordingId, dest: &Path) -> Result<u64> {
        let url = self.url(&[STREAM_PATH, id.as_str()])?;
        crate::verbose!("GET {}", url);

        let response = self.client.get(url).timeout(self.timeout).send().await?;
        let response = check_status(response).await?;

        let written = write_stream(response.bytes_stream(), dest).await?;
        crate::verbose!("Saved {} bytes to {}", written, dest.display());
        Ok(written)
    }
}

/// Write a byte stream to `dest`. A failed write or a broken stream removes
/// the partial file before the error is returned.
async fn write_stream<S, T, E>(stream: S, dest: &Path) -> Result<u64>
where
    S: Stream<Item = std::result::Result<T, E>>,
    T: AsRef<[u8]>,
    ConsoleError: From<E>,
{
    let result = copy_stream(stream, dest).await;
    if result.is_err()
        && let Err(e) = tokio::fs::remove_file(dest).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        crate::verbose!("Failed to remove partial download {}: {}", dest.display(), e);
    }
    result
}

async fn copy_stream<S, T, E>(stream: S, dest: &Path) -> Result<u64>
where
    S: Stream<Item = std::result::Result<T, E>>,
    T: AsRef<[u8]>,
    ConsoleError: From<E>,
{
    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = std::pin::pin!(stream);
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let bytes = chunk.as_ref();
        file.write_all(bytes).await?;
        written += bytes.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

#[async_trait]
impl RecordingsBackend for HttpBackend {
    async fn list(&self, query: &ListQuery) -> Result<ListResponse> {
        let mut url = self.url(&[LIST_PATH])?;
        url.query_pairs_mut().extend_pairs(query.to_pairs());
        crate::verbose!("GET {}", url);

        let response = self.client.get(url).timeout(self.timeout).send().await?;
        read_json(response).await
    }

    async fn upload(&self, request: UploadRequest) -> Result<MessageResponse> {
        let url = self.url(&[UPLOAD_PATH])?;
        crate::verbose!(
            "POST {} ({}, {} bytes)",
            url,
            request.file.file_name,
            request.file.data.len()
        );

        let create_transcript = request.create_transcript_field();
        let language = request.language_field();
        let part = reqwest::multipart::Part::bytes(request.file.data)
            .file_name(request.file.file_name)
            .mime_str(&request.file.mime_type)?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("create_transcript", create_transcript)
            .text("department", request.department)
            .text("language", language);

        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }

    async fn details(&self, id: &RecordingId) -> Result<DetailResponse> {
        let url = self.url(&[DETAILS_PATH, id.as_str()])?;
        crate::verbose!("GET {}", url);

        let response = self.client.get(url).timeout(self.timeout).send().await?;
        read_json(response).await
    }

    async fn delete(&self, id: &RecordingId) -> Result<MessageResponse> {
        let url = self.url(&[DELETE_PATH, id.as_str()])?;
        crate::verbose!("DELETE {}", url);

        let response = self.client.delete(url).timeout(self.timeout).send().await?;
        read_json(response).await
    }

    async fn generate_patterns(&self, request: &PatternRequest) -> Result<PatternResponse> {
        let url = self.url(&[PATTERNS_PATH])?;
        crate::verbose!("POST {} ({} patterns)", url, request.patterns.len());

        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await?;
        read_json(response).await
    }

    fn stream_url(&self, id: &RecordingId) -> String {
        self.url(&[STREAM_PATH, id.as_str()])
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("{}/{}/{}", self.base_url, STREAM_PATH, id))
    }
}

/// Join path segments onto a base URL, percent-encoding each segment
fn endpoint_url(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ConsoleError::Config(format!("Invalid server URL {base_url}: {e}")))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| ConsoleError::Config(format!("Server URL cannot be a base: {base_url}")))?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    Ok(url)
}

/// Path (with query, if any) of an endpoint relative to the server root
pub fn endpoint_path(base_url: &str, segments: &[&str]) -> Result<String> {
    let url = endpoint_url(base_url, segments)?;
    Ok(match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    })
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ConsoleError::Server {
        status: status.as_u16(),
        message: error_message_from_body(&body),
    })
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let response = check_status(response).await?;
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ConsoleError::InvalidResponse(e.to_string()))
}

/// Pull a readable message out of an error body
pub fn error_message_from_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            match value.get(key) {
                Some(serde_json::Value::String(s)) => return s.clone(),
                Some(other) if !other.is_null() => return other.to_string(),
                _ => {}
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}
