//! Per-endpoint fallback policies.
//!
//! A policy turns the pipeline's classified result into an [`Envelope`].
//! Substituting policies carry their generator, so a policy that promises
//! substitute data always has some to give.

use std::fmt;

use serde_json::Value;

use crate::api::envelope::Envelope;
use crate::api::types::{ApiResult, FailureKind};

/// Builds a substitute payload from the request body.
pub type SubstituteFn<T> = fn(&Value) -> T;

/// Name of a fallback policy, without its generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Strict,
    AuthTolerant,
    AlwaysSubstitute,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Strict => "strict",
            PolicyKind::AuthTolerant => "auth-tolerant",
            PolicyKind::AlwaysSubstitute => "always-substitute",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when a call to an endpoint fails.
pub enum Fallback<T> {
    /// Surface every failure untouched.
    Strict,
    /// Substitute on `Unauthorized` and `NotFound` only.
    AuthTolerant(SubstituteFn<T>),
    /// Substitute on any failure.
    AlwaysSubstitute(SubstituteFn<T>),
}

// Manual impls: derive would require `T: Clone`.
impl<T> Clone for Fallback<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Fallback<T> {}

impl<T> fmt::Debug for Fallback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fallback::{}", self.kind())
    }
}

impl<T> Fallback<T> {
    pub const fn kind(&self) -> PolicyKind {
        match self {
            Fallback::Strict => PolicyKind::Strict,
            Fallback::AuthTolerant(_) => PolicyKind::AuthTolerant,
            Fallback::AlwaysSubstitute(_) => PolicyKind::AlwaysSubstitute,
        }
    }

    /// The generator to use for a failure of this kind, if any.
    pub fn generator_for(&self, kind: FailureKind) -> Option<SubstituteFn<T>> {
        match (self, kind) {
            (Fallback::Strict, _) => None,
            (
                Fallback::AuthTolerant(generate),
                FailureKind::Unauthorized | FailureKind::NotFound,
            ) => Some(*generate),
            (Fallback::AuthTolerant(_), _) => None,
            (Fallback::AlwaysSubstitute(generate), _) => Some(*generate),
        }
    }

    /// Whether a failure of this kind is replaced by substitute data.
    pub fn substitutes(&self, kind: FailureKind) -> bool {
        self.generator_for(kind).is_some()
    }

    /// Apply the policy to one classified result.
    pub fn resolve(&self, result: ApiResult<T>, request: &Value) -> Envelope<T> {
        match result {
            Ok(payload) => Envelope::Live(payload),
            Err(cause) => match self.generator_for(cause.kind()) {
                Some(generate) => Envelope::Substituted {
                    payload: generate(request),
                    cause,
                },
                None => Envelope::Failed(cause),
            },
        }
    }
}
