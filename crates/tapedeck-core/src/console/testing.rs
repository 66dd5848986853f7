//! In-memory backend and scripted surface for console tests.

use async_trait::async_trait;
use std::sync::Mutex;

use super::{Console, Surface};
use crate::api::RecordingsBackend;
use crate::error::{ConsoleError, Result};
use crate::model::{
    DetailResponse, ListResponse, MessageResponse, PatternRequest, PatternResponse, Recording,
    RecordingId, UploadRequest,
};
use crate::settings::Settings;
use crate::state::ListQuery;

/// A request the fake backend received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ListQuery),
    Upload(UploadRequest),
    Details(RecordingId),
    Delete(RecordingId),
    Patterns(PatternRequest),
}

/// Canned responses; `None` makes the matching endpoint fail with the
/// configured server error (a 500 unless set otherwise)
#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    list: Mutex<Option<ListResponse>>,
    detail: Mutex<Option<DetailResponse>>,
    message: Mutex<Option<String>>,
    patterns: Mutex<Option<serde_json::Value>>,
    failure: Mutex<(u16, String)>,
}

impl FakeBackend {
    pub fn new() -> Self {
        crate::verbose::set_quiet_failures(true);
        Self {
            list: Mutex::new(Some(ListResponse::default())),
            message: Mutex::new(Some("OK".to_string())),
            failure: Mutex::new((500, "boom".to_string())),
            ..Self::default()
        }
    }

    pub fn set_list(&self, list: Option<ListResponse>) {
        *self.list.lock().unwrap() = list;
    }

    pub fn set_detail(&self, detail: Option<DetailResponse>) {
        *self.detail.lock().unwrap() = detail;
    }

    pub fn set_message(&self, message: Option<String>) {
        *self.message.lock().unwrap() = message;
    }

    pub fn set_patterns(&self, patterns: Option<serde_json::Value>) {
        *self.patterns.lock().unwrap() = patterns;
    }

    pub fn set_failure(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = (status, message.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_queries(&self) -> Vec<ListQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn canned<T: Clone>(&self, slot: &Mutex<Option<T>>) -> Result<T> {
        slot.lock().unwrap().clone().ok_or_else(|| {
            let (status, message) = self.failure.lock().unwrap().clone();
            ConsoleError::Server { status, message }
        })
    }
}

#[async_trait]
impl RecordingsBackend for FakeBackend {
    async fn list(&self, query: &ListQuery) -> Result<ListResponse> {
        self.record(Call::List(query.clone()));
        self.canned(&self.list)
    }

    async fn upload(&self, request: UploadRequest) -> Result<MessageResponse> {
        self.record(Call::Upload(request));
        self.canned(&self.message).map(|message| MessageResponse { message })
    }

    async fn details(&self, id: &RecordingId) -> Result<DetailResponse> {
        self.record(Call::Details(id.clone()));
        self.canned(&self.detail)
    }

    async fn delete(&self, id: &RecordingId) -> Result<MessageResponse> {
        self.record(Call::Delete(id.clone()));
        self.canned(&self.message).map(|message| MessageResponse { message })
    }

    async fn generate_patterns(&self, request: &PatternRequest) -> Result<PatternResponse> {
        self.record(Call::Patterns(request.clone()));
        self.canned(&self.patterns).map(|results| PatternResponse { results })
    }

    fn stream_url(&self, id: &RecordingId) -> String {
        format!("/serve-audio/{id}")
    }
}

/// Records alerts, prompts and clipboard writes
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    pub alerts: Vec<String>,
    pub confirms: Vec<String>,
    pub confirm_answer: bool,
    pub clipboard: Vec<String>,
    pub clipboard_fails: bool,
}

impl ScriptedSurface {
    pub fn answering(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            ..Self::default()
        }
    }
}

impl Surface for ScriptedSurface {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.confirms.push(prompt.to_string());
        self.confirm_answer
    }

    fn write_clipboard(&mut self, text: &str) -> Result<()> {
        if self.clipboard_fails {
            return Err(ConsoleError::Clipboard("no display".to_string()));
        }
        self.clipboard.push(text.to_string());
        Ok(())
    }
}

/// Console over the default option lists
pub fn console(backend: FakeBackend) -> Console<FakeBackend> {
    Console::new(backend, &Settings::default())
}

pub fn recording(id: &str) -> Recording {
    Recording {
        id: RecordingId::new(id),
        original_filename: format!("{id}.mp3"),
        duration: 10.0,
        department: "Sales".to_string(),
        language: "en".to_string(),
        transcript: None,
    }
}
