//! Game engines and the values they exchange.
//!
//! [`Akinator`] and [`AsyncAkinator`] share one protocol core and differ
//! only in whether the network call blocks or is awaited.

mod answer;
mod async_engine;
mod engine;
mod language;
mod page;
mod protocol;
mod result;

pub use answer::{Answer, ParseAnswerError};
pub use async_engine::AsyncAkinator;
pub use engine::Akinator;
pub use language::{Language, ParseLanguageError};
pub use page::{parse_start_page, StartPage};
pub use protocol::{carries_question, proposes_guess, Endpoint, GameOptions, DEFAULT_USER_AGENT};
pub use result::{Failed, GameResult, Guessed, Started};
