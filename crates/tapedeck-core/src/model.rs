//! Wire types exchanged with the recordings backend.
//!
//! Recordings are owned by the server; the console only reads them and asks the
//! server to create or delete them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque recording identifier.
///
/// The backend may send it as a JSON string or number; it is always kept as text
/// and only ever used to build `/get-audio-details/{id}` style paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordingId(String);

impl RecordingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordingId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordingId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Serialize for RecordingId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordingId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => RecordingId(s),
            RawId::Int(n) => RecordingId(n.to_string()),
            RawId::Float(n) => RecordingId(n.to_string()),
        })
    }
}

/// A server-held audio recording with its metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recording {
    pub id: RecordingId,
    pub original_filename: String,
    /// Length in seconds
    #[serde(default)]
    pub duration: f64,
    #[serde(default, deserialize_with = "text_or_list")]
    pub department: String,
    /// Language codes; uploads send a JSON list, older rows hold plain text
    #[serde(default, deserialize_with = "text_or_list")]
    pub language: String,
    #[serde(default)]
    pub transcript: Option<String>,
}

/// Accept `null`, a string, or a list of strings (joined with ", ").
fn text_or_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        List(Vec<String>),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => String::new(),
        Some(Raw::Text(s)) => s,
        Some(Raw::List(items)) => items.join(", "),
    })
}

/// Response of `GET /list-audio-files`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListResponse {
    #[serde(default)]
    pub recordings: Vec<Recording>,
    #[serde(default)]
    pub has_previous: bool,
    #[serde(default)]
    pub has_next: bool,
}

/// Response of `GET /get-audio-details/{id}`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DetailResponse {
    #[serde(default)]
    pub transcript: Option<String>,
}

/// Response of `POST /upload` and `DELETE /delete-audio/{id}`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of `POST /generate-patterns`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PatternRequest {
    pub transcript: String,
    pub patterns: Vec<String>,
}

/// Response of `POST /generate-patterns`; `results` is opaque to the console
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PatternResponse {
    #[serde(default)]
    pub results: serde_json::Value,
}

/// An audio file picked for upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    /// Build an upload from raw bytes, guessing the MIME type from the file name
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for_file_name(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            data,
        }
    }
}

/// Everything the backend needs for `POST /upload`
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub file: UploadFile,
    pub create_transcript: bool,
    pub department: String,
    pub languages: Vec<String>,
}

impl UploadRequest {
    /// The `language` form field: a JSON list of language codes
    pub fn language_field(&self) -> String {
        serde_json::to_string(&self.languages).unwrap_or_else(|_| "[]".to_string())
    }

    /// The `create_transcript` form field
    pub fn create_transcript_field(&self) -> &'static str {
        if self.create_transcript { "true" } else { "false" }
    }
}

/// Guess an audio MIME type from a file extension
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("flac") => "audio/flac",
        Some("webm") => "audio/webm",
        Some("aac") => "audio/aac",
        _ => "application/octet-stream",
    }
}
