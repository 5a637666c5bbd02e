//! Request building and reply classification shared by both engines.
//!
//! Nothing here touches the network. Each operation is split into a
//! `*_call` half that reads the store and builds the request, and a
//! `finish_*` half that interprets the response and writes the store. The
//! blocking and async engines differ only in how they carry the request
//! between the two.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::page::parse_start_page;
use super::result::{Guessed, Started};
use super::{Answer, GameResult, Language};
use crate::error::AkinatorError;
use crate::session::{GameId, SessionRecord, SessionStore};
use crate::transport::{FormRequest, HttpResponse, DEFAULT_TIMEOUT};
use crate::Result;

/// Browser user agent the site expects.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36";

/// Remote endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Game,
    Answer,
    Back,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Game => "game",
            Endpoint::Answer => "answer",
            Endpoint::Back => "back",
        }
    }
}

/// Settings for one game engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    /// Game language, which also picks the regional server.
    pub language: Language,
    /// Restrict the game to child-safe characters.
    pub child_mode: bool,
    /// Replaces `https://{language}.akinator.com` when set.
    pub base_url: Option<String>,
    /// Upper bound on each remote call.
    pub timeout: Duration,
    /// Sent as `user-agent` on every request.
    pub user_agent: String,
}

impl GameOptions {
    pub fn new(language: Language, child_mode: bool) -> Self {
        Self {
            language,
            child_mode,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of an endpoint.
    pub fn url(&self, endpoint: Endpoint) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), endpoint.path()),
            None => format!("https://{}.akinator.com/{}", self.language.code(), endpoint.path()),
        }
    }

    /// The service expects Python-style booleans.
    fn child_mode_flag(&self) -> &'static str {
        if self.child_mode {
            "True"
        } else {
            "False"
        }
    }
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            language: Language::default(),
            child_mode: false,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Whether a JSON reply means Akinator has stopped asking and made a guess.
///
/// The service signals this with a non-null `data.valide_contrainte`.
pub fn proposes_guess(reply: &Value) -> bool {
    reply
        .pointer("/data/valide_contrainte")
        .is_some_and(|flag| !flag.is_null())
}

/// Whether a reply carries the next question of the game.
///
/// `state` is the object holding `question` and `step`: the reply itself for
/// `/answer`, its `data` for `/back`. Failure replies such as
/// `{"completion": "KO - TIMEOUT"}` carry no game state and must not reach
/// the store.
pub fn carries_question(reply: &Value, state: &Value) -> bool {
    let completed = reply
        .get("completion")
        .and_then(Value::as_str)
        .map_or(true, |completion| completion.starts_with("OK"));
    let present = |field: &str| state.get(field).is_some_and(|value| !value.is_null());

    completed && present("question") && present("step")
}

/// A request ready to send, with the record it was built from.
#[derive(Debug, Clone)]
pub(crate) struct PendingCall {
    pub game_id: GameId,
    pub record: SessionRecord,
    pub request: FormRequest,
}

/// Engine state and the transport-independent half of every operation.
pub(crate) struct GameCore {
    options: GameOptions,
    game_id: GameId,
    store: Arc<dyn SessionStore>,
}

impl GameCore {
    pub fn new(options: GameOptions, store: Arc<dyn SessionStore>) -> Self {
        Self {
            options,
            game_id: GameId::new(),
            store,
        }
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    fn request(&self, endpoint: Endpoint) -> FormRequest {
        FormRequest::new(self.options.url(endpoint))
            .header("user-agent", self.options.user_agent.as_str())
            .timeout(self.options.timeout)
    }

    fn load(&self, game_id: &str) -> Result<SessionRecord> {
        self.store
            .get(game_id)?
            .ok_or(AkinatorError::InvalidSession)
    }

    pub fn start_request(&self) -> FormRequest {
        self.request(Endpoint::Game)
            .field("cm", self.options.child_mode_flag())
            .field("sid", "1")
    }

    pub fn finish_start(&self, response: HttpResponse) -> Result<GameResult> {
        if !response.is_success() {
            return Err(AkinatorError::Transport(format!(
                "start page returned HTTP status {}",
                response.status
            )));
        }

        let page = parse_start_page(&response.body)?;
        if page.session.is_empty() || page.signature.is_empty() {
            return Err(AkinatorError::Protocol(
                "Error starting game: Session or signature missing.".into(),
            ));
        }

        let record = SessionRecord::started(page.session, page.signature);
        let started = Started {
            game_id: self.game_id.clone(),
            question: page.question,
            step: record.step,
            progress: record.progress.clone(),
        };
        self.store.set(self.game_id.as_str(), record)?;
        debug!(game_id = %self.game_id, language = %self.options.language, "game started");

        Ok(GameResult::Started(started))
    }

    pub fn answer_call(&self, game_id: &str, answer: Answer) -> Result<PendingCall> {
        let record = self.load(game_id)?;
        let request = self
            .request(Endpoint::Answer)
            .field("step", record.step)
            .field("progression", &record.progress)
            .field("answer", answer.code())
            .field("session", &record.session_token)
            .field("signature", &record.signature_token)
            .field("question_filter", "string")
            .field("sid", "NaN")
            .field("cm", self.options.child_mode_flag())
            .field("step_last_proposition", "");

        Ok(PendingCall {
            game_id: GameId::from_key(game_id),
            record,
            request,
        })
    }

    pub fn finish_answer(&self, call: PendingCall, response: HttpResponse) -> Result<GameResult> {
        if !response.is_success() {
            return Err(AkinatorError::Transport(format!(
                "answer returned HTTP status {}",
                response.status
            )));
        }
        let reply = response
            .json()
            .map_err(|e| AkinatorError::Protocol(format!("answer reply is not JSON: {}", e)))?;

        if proposes_guess(&reply) {
            let data = reply.get("data").unwrap_or(&Value::Null);
            let guessed = Guessed::parse(call.game_id, data);
            debug!(game_id = %guessed.game_id, name = %guessed.name, "guess proposed");
            return Ok(GameResult::Guessed(guessed));
        }

        if !carries_question(&reply, &reply) {
            return Err(AkinatorError::Protocol(format!(
                "answer was not accepted: {}",
                completion(&reply)
            )));
        }

        let started = Started::parse(call.game_id, &reply);
        self.store.set(
            started.game_id.as_str(),
            call.record.advanced(started.step, started.progress.as_str()),
        )?;
        debug!(game_id = %started.game_id, step = started.step, progress = %started.progress, "answer accepted");

        Ok(GameResult::Started(started))
    }

    pub fn back_call(&self, game_id: &str) -> Result<PendingCall> {
        let record = self.load(game_id)?;
        if record.step == 0 {
            return Err(AkinatorError::navigation("already at the first question"));
        }

        let request = self
            .request(Endpoint::Back)
            .field("session", &record.session_token)
            .field("signature", &record.signature_token)
            .field("step", record.step)
            .field("progression", &record.progress)
            .field("cm", self.options.child_mode_flag());

        Ok(PendingCall {
            game_id: GameId::from_key(game_id),
            record,
            request,
        })
    }

    pub fn finish_back(&self, call: PendingCall, response: HttpResponse) -> Result<GameResult> {
        if !response.is_success() {
            return Err(AkinatorError::navigation(format!(
                "HTTP status {}",
                response.status
            )));
        }
        let reply = response
            .json()
            .map_err(|e| AkinatorError::navigation(format!("reply is not JSON: {}", e)))?;
        if proposes_guess(&reply) {
            return Err(AkinatorError::navigation("service answered with a proposition"));
        }

        let data = reply.get("data").unwrap_or(&Value::Null);
        if !carries_question(&reply, data) {
            return Err(AkinatorError::navigation(format!(
                "reply carries no question: {}",
                completion(&reply)
            )));
        }
        let started = Started::parse(call.game_id, data);
        self.store.set(
            started.game_id.as_str(),
            call.record.advanced(started.step, started.progress.as_str()),
        )?;
        debug!(game_id = %started.game_id, step = started.step, "went back");

        Ok(GameResult::Started(started))
    }

    /// Turn an error into the caller-facing result.
    pub fn fail(&self, operation: &str, err: AkinatorError) -> GameResult {
        match &err {
            AkinatorError::Navigation { reason } => {
                debug!(operation, reason = %reason, "back-navigation rejected");
            }
            AkinatorError::InvalidSession => debug!(operation, "unknown or expired game id"),
            other => warn!(operation, "{}", other),
        }
        GameResult::from(err)
    }
}

fn completion(reply: &Value) -> &str {
    reply
        .get("completion")
        .and_then(Value::as_str)
        .unwrap_or("no completion status")
}
