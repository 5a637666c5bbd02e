//! Per-game token state kept between calls.

use serde::{Deserialize, Serialize};

/// Progress value the service expects on a fresh game.
pub const INITIAL_PROGRESS: &str = "0.00000";

/// Server-issued state for one game.
///
/// The tokens come from the start page and never change afterwards. `step`
/// and `progress` are replaced with whatever the service reports after each
/// accepted answer or back-navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Session token.
    pub session_token: String,
    /// Signature token.
    pub signature_token: String,
    /// Server-reported progression, kept verbatim.
    pub progress: String,
    /// Question counter.
    pub step: u32,
}

impl SessionRecord {
    /// Record for a game that has just started.
    pub fn started(session_token: impl Into<String>, signature_token: impl Into<String>) -> Self {
        Self {
            session_token: session_token.into(),
            signature_token: signature_token.into(),
            progress: INITIAL_PROGRESS.to_string(),
            step: 0,
        }
    }

    /// Same tokens, new position in the game.
    pub fn advanced(&self, step: u32, progress: impl Into<String>) -> Self {
        Self {
            session_token: self.session_token.clone(),
            signature_token: self.signature_token.clone(),
            progress: progress.into(),
            step,
        }
    }
}
