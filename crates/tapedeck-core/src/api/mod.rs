//! Recordings backend interface.
//!
//! The console talks to the backend only through [`RecordingsBackend`]. The
//! production implementation is [`HttpBackend`]; tests substitute an in-memory
//! fake.

mod client;
mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{
    DetailResponse, ListResponse, MessageResponse, PatternRequest, PatternResponse, RecordingId,
    UploadRequest,
};
use crate::state::ListQuery;

pub use client::get_http_client;
pub use http::{HttpBackend, endpoint_path, error_message_from_body};

pub const LIST_PATH: &str = "list-audio-files";
pub const UPLOAD_PATH: &str = "upload";
pub const DETAILS_PATH: &str = "get-audio-details";
pub const STREAM_PATH: &str = "serve-audio";
pub const DELETE_PATH: &str = "delete-audio";
pub const PATTERNS_PATH: &str = "generate-patterns";

#[async_trait]
pub trait RecordingsBackend: Send + Sync {
    /// `GET /list-audio-files`
    async fn list(&self, query: &ListQuery) -> Result<ListResponse>;

    /// `POST /upload` (multipart)
    async fn upload(&self, request: UploadRequest) -> Result<MessageResponse>;

    /// `GET /get-audio-details/{id}`
    async fn details(&self, id: &RecordingId) -> Result<DetailResponse>;

    /// `DELETE /delete-audio/{id}`
    async fn delete(&self, id: &RecordingId) -> Result<MessageResponse>;

    /// `POST /generate-patterns`
    async fn generate_patterns(&self, request: &PatternRequest) -> Result<PatternResponse>;

    /// URL of `/serve-audio/{id}`, handed to the player
    fn stream_url(&self, id: &RecordingId) -> String;
}
