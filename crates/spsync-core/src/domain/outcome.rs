//! Operation outcomes and failure aggregation
//!
//! Every public operation returns an [`Outcome`]: either a success carrying
//! a descriptive message, or the flat, ordered list of every [`Failure`]
//! encountered underneath it. Recursive operations never stop at the first
//! failure; they feed each child's outcome into a [`FailureCollector`] and
//! fold the result once all siblings have been visited.
//!
//! Callers that still speak the string protocol can use
//! [`Outcome::to_legacy_string`], which renders each failure as
//! `FAIL:<message>` and joins them with `,`.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Prefix marking a failure in the legacy string protocol
pub const FAILURE_SENTINEL: &str = "FAIL:";

/// Delimiter between failures in the legacy string protocol
pub const LEGACY_DELIMITER: &str = ",";

/// Message used when an entry point is called without a remote session
pub const UNAUTHENTICATED_MESSAGE: &str = "Authentication is needed.";

/// Classification of a failure by its cause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No active remote session
    Unauthenticated,
    /// Target path does not exist locally or remotely
    NotFound,
    /// A file was supplied where a folder was expected, or vice versa
    WrongKind,
    /// The remote store rejected the path shape (full URL, sharing link)
    MalformedPath,
    /// Local filesystem error
    Io,
    /// Anything the store did not classify, including connectivity loss
    Unknown,
}

/// A single leaf failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The failure reported by every entry point when no session is active
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::new(FailureKind::Unauthenticated, UNAUTHENTICATED_MESSAGE)
    }

    /// A local filesystem failure while performing `action`
    pub fn io(action: &str, err: &std::io::Error) -> Self {
        let kind = if err.kind() == std::io::ErrorKind::NotFound {
            FailureKind::NotFound
        } else {
            FailureKind::Io
        };
        Self::new(kind, format!("{action} with error: {err}"))
    }

    /// Legacy rendering: `FAIL:<message>`
    #[must_use]
    pub fn to_legacy_string(&self) -> String {
        format!("{FAILURE_SENTINEL}{}", self.message)
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Result of a public operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Everything succeeded
    Success(String),
    /// One or more failures, in the order they were encountered
    Failure(Vec<Failure>),
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Outcome::Success(message.into())
    }

    #[must_use]
    pub fn failure(failure: Failure) -> Self {
        Outcome::Failure(vec![failure])
    }

    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::failure(Failure::unauthenticated())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The failures carried by this outcome (empty on success)
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        match self {
            Outcome::Success(_) => &[],
            Outcome::Failure(failures) => failures,
        }
    }

    /// The success message, if any
    #[must_use]
    pub fn success_message(&self) -> Option<&str> {
        match self {
            Outcome::Success(message) => Some(message),
            Outcome::Failure(_) => None,
        }
    }

    /// Render in the legacy string protocol
    #[must_use]
    pub fn to_legacy_string(&self) -> String {
        match self {
            Outcome::Success(message) => message.clone(),
            Outcome::Failure(failures) => failures
                .iter()
                .map(Failure::to_legacy_string)
                .collect::<Vec<_>>()
                .join(LEGACY_DELIMITER),
        }
    }

    /// Parse a legacy string result
    ///
    /// Anything not starting with `FAIL:` is a success. Failures are split at
    /// every `,FAIL:` boundary, so a comma inside a message survives as long
    /// as it is not immediately followed by the sentinel. Parsed failures are
    /// classified as [`FailureKind::Unknown`].
    #[must_use]
    pub fn from_legacy_string(s: &str) -> Self {
        let Some(rest) = s.strip_prefix(FAILURE_SENTINEL) else {
            return Outcome::Success(s.to_string());
        };

        let boundary = format!("{LEGACY_DELIMITER}{FAILURE_SENTINEL}");
        let failures = rest
            .split(boundary.as_str())
            .map(|message| Failure::new(FailureKind::Unknown, message))
            .collect();
        Outcome::Failure(failures)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_legacy_string())
    }
}

impl From<Failure> for Outcome {
    fn from(failure: Failure) -> Self {
        Outcome::failure(failure)
    }
}

// ============================================================================
// FailureCollector
// ============================================================================

/// Order-preserving accumulator for sibling outcomes
///
/// Successes are dropped; failures are appended in the order they are
/// recorded. [`FailureCollector::finish`] yields the supplied success
/// message only when nothing was recorded.
#[derive(Debug, Default)]
pub struct FailureCollector {
    failures: Vec<Failure>,
}

impl FailureCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a sub-operation
    pub fn record(&mut self, outcome: Outcome) {
        if let Outcome::Failure(failures) = outcome {
            self.failures.extend(failures);
        }
    }

    /// Record a single failure directly
    pub fn push(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Fold everything recorded into a single outcome
    pub fn finish(self, success_message: impl Into<String>) -> Outcome {
        if self.failures.is_empty() {
            Outcome::Success(success_message.into())
        } else {
            Outcome::Failure(self.failures)
        }
    }
}

impl Extend<Outcome> for FailureCollector {
    fn extend<I: IntoIterator<Item = Outcome>>(&mut self, iter: I) {
        for outcome in iter {
            self.record(outcome);
        }
    }
}

/// Fold a sequence of outcomes into one
pub fn aggregate(
    outcomes: impl IntoIterator<Item = Outcome>,
    success_message: impl Into<String>,
) -> Outcome {
    let mut collector = FailureCollector::new();
    collector.extend(outcomes);
    collector.finish(success_message)
}
