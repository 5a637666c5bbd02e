//! Answer codes.

use std::fmt;
use std::str::FromStr;

/// A reply to one of Akinator's questions.
///
/// Short labels such as `y` or `pn` are input spellings only; they parse to
/// the same variant as the full name and share its wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    Yes,
    No,
    Idk,
    Probably,
    ProbablyNot,
}

impl Answer {
    /// All answers in wire-code order.
    pub const ALL: [Answer; 5] = [
        Answer::Yes,
        Answer::No,
        Answer::Idk,
        Answer::Probably,
        Answer::ProbablyNot,
    ];

    /// Code sent to the service.
    pub fn code(self) -> u8 {
        match self {
            Answer::Yes => 0,
            Answer::No => 1,
            Answer::Idk => 2,
            Answer::Probably => 3,
            Answer::ProbablyNot => 4,
        }
    }

    /// Answer for a wire code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Answer::Yes => "yes",
            Answer::No => "no",
            Answer::Idk => "don't know",
            Answer::Probably => "probably",
            Answer::ProbablyNot => "probably not",
        };
        f.write_str(label)
    }
}

/// Error returned when an answer label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAnswerError(pub String);

impl fmt::Display for ParseAnswerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown answer: '{}'", self.0)
    }
}

impl std::error::Error for ParseAnswerError {}

impl FromStr for Answer {
    type Err = ParseAnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "y" | "yes" | "0" => Ok(Answer::Yes),
            "n" | "no" | "1" => Ok(Answer::No),
            "i" | "idk" | "dk" | "dontknow" | "2" => Ok(Answer::Idk),
            "p" | "probably" | "3" => Ok(Answer::Probably),
            "pn" | "probablynot" | "4" => Ok(Answer::ProbablyNot),
            _ => Err(ParseAnswerError(s.to_string())),
        }
    }
}
