//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use akinator::{AkinatorError, AsyncTransport, FormRequest, HttpResponse, Transport};
use async_trait::async_trait;
use serde_json::json;

/// One scripted transport outcome.
pub enum Reply {
    Response(HttpResponse),
    Timeout,
    Network(&'static str),
}

/// Transport that replays scripted replies and records every request.
#[derive(Default)]
pub struct StubTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<FormRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn then_ok(self, status: u16, body: impl Into<String>) -> Self {
        self.then(Reply::Response(HttpResponse::new(status, body)))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<FormRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> FormRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request sent")
    }

    fn next(&self, request: &FormRequest) -> akinator::Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Timeout) => Err(AkinatorError::Timeout(request.timeout)),
            Some(Reply::Network(message)) => Err(AkinatorError::Transport(message.to_string())),
            None => Err(AkinatorError::Transport("no stubbed reply".to_string())),
        }
    }
}

impl Transport for StubTransport {
    fn post(&self, request: &FormRequest) -> akinator::Result<HttpResponse> {
        self.next(request)
    }
}

#[async_trait]
impl AsyncTransport for StubTransport {
    async fn post(&self, request: &FormRequest) -> akinator::Result<HttpResponse> {
        self.next(request)
    }
}

pub const FIRST_QUESTION: &str = "Does your character exist?";

pub fn start_html(question: &str, session: &str, signature: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body>
  <div class="bubble-body">
    <p class="question-text" id="question-label">{question}</p>
  </div>
  <form id="askSoundlike" action="/answer" method="post">
    <input type="hidden" name="step" value="0">
    <input type="hidden" name="session" value="{session}">
    <input type="hidden" name="signature" value="{signature}">
  </form>
</body>
</html>"#
    )
}

pub fn default_start_page() -> String {
    start_html(FIRST_QUESTION, "S1", "G1")
}

/// Reply to `/answer` while the game keeps asking.
pub fn question_reply(question: &str, step: u32, progression: &str) -> String {
    json!({
        "completion": "OK",
        "akitude": "defi.png",
        "step": step.to_string(),
        "progression": progression,
        "question_id": "42",
        "question": question,
        "data": { "valide_contrainte": null }
    })
    .to_string()
}

/// Reply to `/answer` once a guess is proposed.
pub fn guess_reply(name: &str, description: &str, photo: &str) -> String {
    json!({
        "completion": "OK",
        "data": {
            "valide_contrainte": "1",
            "id_proposition": "12345",
            "name_proposition": name,
            "description_proposition": description,
            "photo": photo
        }
    })
    .to_string()
}

/// Reply to `/back`.
pub fn back_reply(question: &str, step: u32, progression: &str) -> String {
    json!({
        "completion": "OK",
        "data": {
            "valide_contrainte": null,
            "step": step.to_string(),
            "progression": progression,
            "question": question
        }
    })
    .to_string()
}

pub const TIMEOUT: Duration = Duration::from_secs(120);
