//! # akinator
//!
//! Client library for the Akinator guessing game.
//!
//! The library drives the game through the site's own endpoints: it scrapes
//! the start page for the session tokens, keeps them in an expiring local
//! store, and turns every reply into one of three outcomes.
//!
//! ## Features
//!
//! - **Blocking and async engines**: [`Akinator`] and [`AsyncAkinator`] share
//!   one protocol core and behave identically
//! - **Pluggable session store**: file-backed by default, in-memory for tests
//! - **Pluggable transport**: reqwest by default, any [`Transport`] or
//!   [`AsyncTransport`] implementation otherwise
//! - **No panics across the API**: failures come back as [`GameResult::Failed`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use akinator::{Answer, AsyncAkinator, GameResult, Language};
//!
//! #[tokio::main]
//! async fn main() -> akinator::Result<()> {
//!     akinator::logging::try_init().ok();
//!
//!     let aki = AsyncAkinator::new(Language::English, false)?;
//!     let GameResult::Started(first) = aki.start().await else {
//!         return Ok(());
//!     };
//!     println!("{}", first.question);
//!
//!     match aki.answer(first.game_id.as_str(), Answer::Yes).await {
//!         GameResult::Started(next) => println!("{}", next.question),
//!         GameResult::Guessed(guess) => println!("I think of {}", guess.name),
//!         GameResult::Failed(failed) => eprintln!("{}", failed.message),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use error::{AkinatorError, Result};
pub use game::{
    Akinator, Answer, AsyncAkinator, Failed, GameOptions, GameResult, Guessed, Language, Started,
};
pub use session::{FileStore, GameId, MemoryStore, SessionRecord, SessionStore};
pub use transport::{AsyncHttpTransport, AsyncTransport, FormRequest, HttpResponse, HttpTransport, Transport};
