//! Blocking game engine.

use std::sync::Arc;

use super::protocol::GameCore;
use super::{Answer, GameOptions, GameResult, Language};
use crate::config::Config;
use crate::session::{FileStore, GameId, SessionStore};
use crate::transport::{HttpTransport, Transport};
use crate::Result;

/// A game of Akinator driven with blocking calls.
///
/// The engine owns one game id for its whole life. [`start`](Self::start)
/// (re)creates the record for that id; [`answer`](Self::answer) and
/// [`back`](Self::back) take the id explicitly, so a long-lived engine can
/// also serve ids handed out earlier by another engine sharing the store.
///
/// Calls for the same game id must be made one at a time, in order.
///
/// # Example
///
/// ```no_run
/// use akinator::{Akinator, Answer, GameResult, Language};
///
/// let aki = Akinator::new(Language::English, false)?;
/// if let GameResult::Started(first) = aki.start() {
///     println!("{}", first.question);
///     let next = aki.answer(first.game_id.as_str(), Answer::Yes);
///     println!("{}", next);
/// }
/// # Ok::<(), akinator::AkinatorError>(())
/// ```
pub struct Akinator<T = HttpTransport> {
    core: GameCore,
    transport: T,
}

impl Akinator<HttpTransport> {
    /// Engine using the default file store and an HTTP transport.
    pub fn new(language: Language, child_mode: bool) -> Result<Self> {
        let store: Arc<dyn SessionStore> = Arc::new(FileStore::open_default()?);
        Ok(Self::with_transport(
            GameOptions::new(language, child_mode),
            store,
            HttpTransport::new()?,
        ))
    }

    /// Engine built from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn SessionStore> = Arc::new(config.open_store()?);
        Ok(Self::with_transport(
            config.game_options(),
            store,
            HttpTransport::new()?,
        ))
    }
}

impl<T: Transport> Akinator<T> {
    /// Engine over an explicit store and transport.
    pub fn with_transport(options: GameOptions, store: Arc<dyn SessionStore>, transport: T) -> Self {
        Self {
            core: GameCore::new(options, store),
            transport,
        }
    }

    /// Id of the game this engine starts.
    pub fn game_id(&self) -> &GameId {
        self.core.game_id()
    }

    pub fn options(&self) -> &GameOptions {
        self.core.options()
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        self.core.store()
    }

    /// Start (or restart) this engine's game.
    pub fn start(&self) -> GameResult {
        self.try_start()
            .unwrap_or_else(|e| self.core.fail("start", e))
    }

    /// Answer the current question of `game_id`.
    pub fn answer(&self, game_id: &str, answer: Answer) -> GameResult {
        self.try_answer(game_id, answer)
            .unwrap_or_else(|e| self.core.fail("answer", e))
    }

    /// Return to the previous question of `game_id`.
    pub fn back(&self, game_id: &str) -> GameResult {
        self.try_back(game_id)
            .unwrap_or_else(|e| self.core.fail("back", e))
    }

    /// Like [`start`](Self::start), but returns the error instead of a `Failed` result.
    pub fn try_start(&self) -> Result<GameResult> {
        let response = self.transport.post(&self.core.start_request())?;
        self.core.finish_start(response)
    }

    /// Like [`answer`](Self::answer), but returns the error instead of a `Failed` result.
    pub fn try_answer(&self, game_id: &str, answer: Answer) -> Result<GameResult> {
        let call = self.core.answer_call(game_id, answer)?;
        let response = self.transport.post(&call.request)?;
        self.core.finish_answer(call, response)
    }

    /// Like [`back`](Self::back), but returns the error instead of a `Failed` result.
    pub fn try_back(&self, game_id: &str) -> Result<GameResult> {
        let call = self.core.back_call(game_id)?;
        let response = self.transport.post(&call.request)?;
        self.core.finish_back(call, response)
    }
}
