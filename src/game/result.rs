//! Outcomes of game operations.
//!
//! Every remote call ends in one of three shapes: the next question, a final
//! guess, or a failure. The `parse` constructors are lenient on purpose:
//! missing or oddly typed fields become empty strings or zero, so a drifting
//! upstream payload yields a sparse result rather than an error. Whether a
//! call succeeded is decided by the engine before any of them run.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};

use crate::session::GameId;

/// String field, empty when absent. Numbers are rendered as text.
pub(crate) fn text_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Step counter, zero when absent or unparseable. The service sends it as a
/// string.
pub(crate) fn step_field(value: &Value, key: &str) -> u32 {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// The game continues with a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Started {
    #[serde(rename = "id")]
    pub game_id: GameId,
    pub question: String,
    pub step: u32,
    pub progress: String,
}

impl Started {
    /// Build from a JSON object carrying `question`, `step` and `progression`.
    pub fn parse(game_id: GameId, raw: &Value) -> Self {
        Self {
            game_id,
            question: text_field(raw, "question"),
            step: step_field(raw, "step"),
            progress: text_field(raw, "progression"),
        }
    }

    /// Progress as a percentage, zero if the service sent something odd.
    pub fn progress_percent(&self) -> f64 {
        self.progress.trim().parse().unwrap_or(0.0)
    }
}

/// Akinator has committed to a guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guessed {
    #[serde(rename = "id")]
    pub game_id: GameId,
    pub name: String,
    pub description: String,
    #[serde(rename = "photo")]
    pub photo_url: String,
}

impl Guessed {
    /// Build from the `data` object of a proposition reply.
    pub fn parse(game_id: GameId, raw: &Value) -> Self {
        Self {
            game_id,
            name: text_field(raw, "name_proposition"),
            description: text_field(raw, "description_proposition"),
            photo_url: text_field(raw, "photo"),
        }
    }
}

/// The operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failed {
    #[serde(rename = "error")]
    pub message: String,
}

impl Failed {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build from an `{"error": "..."}` object.
    pub fn parse(raw: &Value) -> Self {
        Self::new(text_field(raw, "error"))
    }
}

/// Result of `start`, `answer` or `back`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    Started(Started),
    Guessed(Guessed),
    Failed(Failed),
}

impl GameResult {
    /// `false` only for [`GameResult::Failed`].
    pub fn is_ok(&self) -> bool {
        !matches!(self, GameResult::Failed(_))
    }

    pub fn as_started(&self) -> Option<&Started> {
        match self {
            GameResult::Started(started) => Some(started),
            _ => None,
        }
    }

    pub fn as_guessed(&self) -> Option<&Guessed> {
        match self {
            GameResult::Guessed(guessed) => Some(guessed),
            _ => None,
        }
    }

    pub fn as_failed(&self) -> Option<&Failed> {
        match self {
            GameResult::Failed(failed) => Some(failed),
            _ => None,
        }
    }

    /// Render as `{"ok": true, "result": {...}}` or `{"ok": false, "error": "..."}`.
    pub fn to_json(&self) -> Value {
        match self {
            GameResult::Started(started) => json!({ "ok": true, "result": started }),
            GameResult::Guessed(guessed) => json!({ "ok": true, "result": guessed }),
            GameResult::Failed(failed) => json!({ "ok": false, "error": failed.message }),
        }
    }
}

impl From<crate::error::AkinatorError> for GameResult {
    fn from(err: crate::error::AkinatorError) -> Self {
        GameResult::Failed(Failed::new(err.to_string()))
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string_pretty(&self.to_json()).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AkinatorError;

    #[test]
    fn test_started_parse_string_step() {
        let id = GameId::new();
        let raw = json!({"question": "Is your character real?", "step": "3", "progression": "41.2"});
        let started = Started::parse(id.clone(), &raw);

        assert_eq!(started.game_id, id);
        assert_eq!(started.question, "Is your character real?");
        assert_eq!(started.step, 3);
        assert_eq!(started.progress, "41.2");
        assert!((started.progress_percent() - 41.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_started_parse_is_lenient() {
        let started = Started::parse(GameId::new(), &json!({"step": -2, "progression": 12.5}));
        assert_eq!(started.question, "");
        assert_eq!(started.step, 0);
        assert_eq!(started.progress, "12.5");

        let empty = Started::parse(GameId::new(), &Value::Null);
        assert_eq!(empty.step, 0);
        assert_eq!(empty.progress, "");
        assert_eq!(empty.progress_percent(), 0.0);
    }

    #[test]
    fn test_guessed_parse() {
        let raw = json!({
            "valide_contrainte": "1",
            "name_proposition": "Mario",
            "description_proposition": "Plumber",
            "photo": "https://photos.example/mario.jpg"
        });
        let guessed = Guessed::parse(GameId::new(), &raw);
        assert_eq!(guessed.name, "Mario");
        assert_eq!(guessed.description, "Plumber");
        assert_eq!(guessed.photo_url, "https://photos.example/mario.jpg");

        let sparse = Guessed::parse(GameId::new(), &json!({"name_proposition": "Luigi"}));
        assert_eq!(sparse.name, "Luigi");
        assert_eq!(sparse.description, "");
    }

    #[test]
    fn test_failed_parse_and_ok_flag() {
        let failed = Failed::parse(&json!({"ok": false, "error": "Invalid game ID"}));
        assert_eq!(failed.message, "Invalid game ID");
        assert!(!GameResult::Failed(failed).is_ok());
        assert_eq!(Failed::parse(&json!({})).message, "");
    }

    #[test]
    fn test_from_error() {
        let result = GameResult::from(AkinatorError::InvalidSession);
        assert_eq!(result.as_failed().unwrap().message, "Invalid game ID");
    }

    #[test]
    fn test_json_shape() {
        let started = GameResult::Started(Started {
            game_id: GameId::new(),
            question: "Q".into(),
            step: 0,
            progress: "0.00000".into(),
        });
        let json = started.to_json();
        assert_eq!(json["ok"], true);
        assert_eq!(json["result"]["question"], "Q");
        assert_eq!(json["result"]["progress"], "0.00000");
        assert!(json["result"]["id"].is_string());

        let failed = GameResult::Failed(Failed::new("Unable to go back"));
        assert_eq!(failed.to_json(), json!({"ok": false, "error": "Unable to go back"}));
        assert!(failed.to_string().contains("Unable to go back"));
    }
}
