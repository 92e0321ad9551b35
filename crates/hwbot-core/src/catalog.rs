//! Review status codes and their verdict texts.

use std::fmt;

use crate::{Error, Result};

/// Machine-readable review outcome reported by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Approved,
    Reviewing,
    Rejected,
}

impl StatusCode {
    pub const ALL: [StatusCode; 3] = [
        StatusCode::Approved,
        StatusCode::Reviewing,
        StatusCode::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Approved => "approved",
            StatusCode::Reviewing => "reviewing",
            StatusCode::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == raw)
            .ok_or_else(|| Error::UnknownStatus(raw.to_string()))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed mapping from [`StatusCode`] to the verdict shown to the user.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusCatalog;

impl StatusCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn verdict(&self, code: StatusCode) -> &'static str {
        match code {
            StatusCode::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            StatusCode::Reviewing => "Работа взята на проверку ревьюером.",
            StatusCode::Rejected => "Работа проверена, в ней нашлись ошибки.",
        }
    }

    /// Verdict text for a raw status string; unknown codes are an error, never a default.
    pub fn text_for(&self, raw: &str) -> Result<&'static str> {
        StatusCode::parse(raw).map(|code| self.verdict(code))
    }
}
