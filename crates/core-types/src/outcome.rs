use std::fmt;

use serde::{Deserialize, Serialize};

pub const SUCCESS_TAG: &str = "SUCCESS";
pub const ERROR_TAG: &str = "ERROR";

/// Discriminated result of a terminal operation.
///
/// Hosts that predate typed results branch on the `SUCCESS:` / `ERROR:` prefix of a
/// plain string; [`Outcome::to_tagged`] and [`Outcome::parse_tagged`] convert at that
/// boundary and nowhere else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    Success(String),
    Failure(String),
}

impl Outcome {
    pub fn success(detail: impl Into<String>) -> Self {
        Outcome::Success(detail.into())
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Outcome::Failure(reason.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn detail(&self) -> &str {
        match self {
            Outcome::Success(detail) | Outcome::Failure(detail) => detail,
        }
    }

    pub fn to_tagged(&self) -> String {
        match self {
            Outcome::Success(detail) => format!("{SUCCESS_TAG}: {detail}"),
            Outcome::Failure(reason) => format!("{ERROR_TAG}: {reason}"),
        }
    }

    /// Reads a tagged string. Anything without the success prefix is a failure.
    pub fn parse_tagged(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(rest) = trimmed.strip_prefix(SUCCESS_TAG) {
            return Outcome::Success(strip_separator(rest));
        }
        if let Some(rest) = trimmed.strip_prefix(ERROR_TAG) {
            return Outcome::Failure(strip_separator(rest));
        }
        Outcome::Failure(trimmed.to_string())
    }

    pub fn into_result(self) -> Result<String, String> {
        match self {
            Outcome::Success(detail) => Ok(detail),
            Outcome::Failure(reason) => Err(reason),
        }
    }
}

fn strip_separator(rest: &str) -> String {
    rest.trim_start_matches(':').trim().to_string()
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_tagged())
    }
}

impl<E: fmt::Display> From<Result<String, E>> for Outcome {
    fn from(value: Result<String, E>) -> Self {
        match value {
            Ok(detail) => Outcome::Success(detail),
            Err(err) => Outcome::Failure(err.to_string()),
        }
    }
}
