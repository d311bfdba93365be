//! Core domain types for homework review statuses

use serde::{Deserialize, Serialize};

/// Review status of a submitted homework
///
/// The review API reports exactly three statuses. Anything else in the
/// payload is treated as an error by the parser rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    /// Review finished, work accepted
    Approved,
    /// Work taken for review
    Reviewing,
    /// Review finished, reviewer has remarks
    Rejected,
}

impl HomeworkStatus {
    /// Get string representation as used by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Parse an API status string, `None` for anything outside the closed set
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Localized verdict sentence for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
