//! Async game engine.

use std::sync::Arc;

use super::protocol::GameCore;
use super::{Answer, GameOptions, GameResult, Language};
use crate::config::Config;
use crate::session::{FileStore, GameId, SessionStore};
use crate::transport::{AsyncHttpTransport, AsyncTransport};
use crate::Result;

/// A game of Akinator driven from async code.
///
/// Behaves exactly like [`Akinator`](super::Akinator); only the network call
/// is awaited. Store access stays synchronous.
pub struct AsyncAkinator<T = AsyncHttpTransport> {
    core: GameCore,
    transport: T,
}

impl AsyncAkinator<AsyncHttpTransport> {
    /// Engine using the default file store and an HTTP transport.
    pub fn new(language: Language, child_mode: bool) -> Result<Self> {
        let store: Arc<dyn SessionStore> = Arc::new(FileStore::open_default()?);
        Ok(Self::with_transport(
            GameOptions::new(language, child_mode),
            store,
            AsyncHttpTransport::new()?,
        ))
    }

    /// Engine built from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn SessionStore> = Arc::new(config.open_store()?);
        Ok(Self::with_transport(
            config.game_options(),
            store,
            AsyncHttpTransport::new()?,
        ))
    }
}

impl<T: AsyncTransport> AsyncAkinator<T> {
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
    pub async fn start(&self) -> GameResult {
        match self.try_start().await {
            Ok(result) => result,
            Err(e) => self.core.fail("start", e),
        }
    }

    /// Answer the current question of `game_id`.
    pub async fn answer(&self, game_id: &str, answer: Answer) -> GameResult {
        match self.try_answer(game_id, answer).await {
            Ok(result) => result,
            Err(e) => self.core.fail("answer", e),
        }
    }

    /// Return to the previous question of `game_id`.
    pub async fn back(&self, game_id: &str) -> GameResult {
        match self.try_back(game_id).await {
            Ok(result) => result,
            Err(e) => self.core.fail("back", e),
        }
    }

    /// Like [`start`](Self::start), but returns the error instead of a `Failed` result.
    pub async fn try_start(&self) -> Result<GameResult> {
        let response = self.transport.post(&self.core.start_request()).await?;
        self.core.finish_start(response)
    }

    /// Like [`answer`](Self::answer), but returns the error instead of a `Failed` result.
    pub async fn try_answer(&self, game_id: &str, answer: Answer) -> Result<GameResult> {
        let call = self.core.answer_call(game_id, answer)?;
        let response = self.transport.post(&call.request).await?;
        self.core.finish_answer(call, response)
    }

    /// Like [`back`](Self::back), but returns the error instead of a `Failed` result.
    pub async fn try_back(&self, game_id: &str) -> Result<GameResult> {
        let call = self.core.back_call(game_id)?;
        let response = self.transport.post(&call.request).await?;
        self.core.finish_back(call, response)
    }
}
