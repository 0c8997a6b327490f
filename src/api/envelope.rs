//! The uniform value returned by every client call.

use std::fmt;

use crate::api::types::ApiFailure;

/// Terminal state of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The backend answered 2xx and the body matched the record type.
    Succeeded,
    /// The call failed and the failure was handed back to the caller.
    FailedStrict,
    /// The call failed and a substitute payload was returned in its place.
    FailedSubstituted,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Succeeded => "succeeded",
            Outcome::FailedStrict => "failed",
            Outcome::FailedSubstituted => "substituted",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either a payload or a failure, never both and never neither.
///
/// A substituted payload keeps the failure that triggered it so callers
/// and logs can tell it apart from live data; [`Envelope::failure`] still
/// reports `None` for it.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Live(T),
    Substituted { payload: T, cause: ApiFailure },
    Failed(ApiFailure),
}

impl<T> Envelope<T> {
    pub fn outcome(&self) -> Outcome {
        match self {
            Envelope::Live(_) => Outcome::Succeeded,
            Envelope::Substituted { .. } => Outcome::FailedSubstituted,
            Envelope::Failed(_) => Outcome::FailedStrict,
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Envelope::Live(payload) | Envelope::Substituted { payload, .. } => Some(payload),
            Envelope::Failed(_) => None,
        }
    }

    /// The failure surfaced to the caller. `None` for live and substituted payloads.
    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            Envelope::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// The failure a substitute payload stands in for.
    pub fn substitution_cause(&self) -> Option<&ApiFailure> {
        match self {
            Envelope::Substituted { cause, .. } => Some(cause),
            _ => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Envelope::Live(_))
    }

    pub fn is_substitute(&self) -> bool {
        matches!(self, Envelope::Substituted { .. })
    }

    pub fn into_payload(self) -> Option<T> {
        match self {
            Envelope::Live(payload) | Envelope::Substituted { payload, .. } => Some(payload),
            Envelope::Failed(_) => None,
        }
    }

    /// Substitutes count as success here, matching what a view would render.
    pub fn into_result(self) -> Result<T, ApiFailure> {
        match self {
            Envelope::Live(payload) | Envelope::Substituted { payload, .. } => Ok(payload),
            Envelope::Failed(failure) => Err(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Envelope::Live(payload) => Envelope::Live(f(payload)),
            Envelope::Substituted { payload, cause } => Envelope::Substituted {
                payload: f(payload),
                cause,
            },
            Envelope::Failed(failure) => Envelope::Failed(failure),
        }
    }
}
