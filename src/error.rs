//! Error types for the BFS gateway client.
//!
//! This module defines all error types that can occur during gateway operations.
//! All errors implement the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Configuration errors** ([`Error::Config`]): missing or invalid client setup
//! - **Validation errors** ([`Error::Validation`]): caller input rejected before any network call
//! - **Business errors** ([`Error::Business`]): the gateway answered without the success code
//! - **HTTP errors** ([`Error::Rejected`], [`Error::Api`]): 4xx/5xx responses with decoded context
//! - **Network errors** ([`Error::Network`]): transport faults and timeouts
//!
//! Every public payment step wraps whatever went wrong into [`Error::Step`],
//! so a caller of a given step sees one dominant error surface per call. The
//! proximate cause stays recoverable as a structured value through
//! [`Error::cause`] rather than being flattened into a message string.
//!
//! # Examples
//!
//! ```
//! use bfs_gateway::error::{Error, PaymentStep};
//!
//! let inner = Error::Network("connection timed out".to_owned());
//! let outer = inner.into_step(PaymentStep::DebitRequest);
//!
//! assert!(outer.is_retryable());
//! assert!(matches!(outer.cause(), Error::Network(_)));
//! ```

use thiserror::Error;

/// Result type alias for gateway operations.
///
/// This is a convenience type that uses [`Error`] as the error type.
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, Error>;

/// The three protocol steps, used to label wrapped step errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStep {
    /// Payment initiation (`AR`).
    Authorization,
    /// Account binding and OTP delivery (`AE`).
    AccountInquiry,
    /// Final debit with OTP (`DR`).
    DebitRequest,
}

impl std::fmt::Display for PaymentStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Authorization => "authorization request",
            Self::AccountInquiry => "account inquiry",
            Self::DebitRequest => "debit request",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in the BFS gateway client.
///
/// All variants include contextual information about what went wrong. Remote
/// descriptions are carried verbatim; sensitive request fields (OTP, account
/// numbers) are never embedded in any message.
///
/// # Error Recovery
///
/// - [`Network`](Self::Network) is the only class that is safe to retry
///   automatically; see [`crate::reliability::retry_with_backoff`]
/// - [`Config`](Self::Config) and [`Validation`](Self::Validation) require
///   fixing the setup or the input before calling again
/// - [`Business`](Self::Business) carries the remote response code; callers
///   may choose to retry codes the gateway documents as transient
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum Error {
    /// Client configuration is unusable.
    ///
    /// Raised at construction time, before any network call. When required
    /// fields are empty, `missing` names every one of them so the caller can
    /// fix the whole configuration in one pass.
    #[error("invalid gateway configuration: {detail}")]
    Config {
        /// Human-readable summary of what is wrong.
        detail: String,
        /// Required fields that were empty, if that is the problem.
        missing: Vec<&'static str>,
    },

    /// A caller-supplied argument failed a precondition.
    ///
    /// Raised by the Authorization step before anything is sent: empty order
    /// number, non-positive amount, malformed email. Fix the input and call
    /// again; retrying unchanged input will fail the same way.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Name of the offending argument.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The gateway answered, but not with the success code.
    ///
    /// Covers both a non-`"00"` `bfs_responseCode` and a response body with
    /// no `result` payload at all (in which case `code` is empty). The
    /// description is the remote-supplied text, falling back to
    /// "Unknown error".
    #[error("payment declined by gateway: {description}")]
    Business {
        /// Remote `bfs_responseCode`, empty when the payload was absent.
        code: String,
        /// Remote `bfs_responseDesc` or a fallback.
        description: String,
    },

    /// The gateway rejected the request with an HTTP 4xx status.
    ///
    /// The body is decoded when possible and the business response code and
    /// description are lifted out of `result` for context. This class means
    /// the request itself was unacceptable; do not retry unchanged.
    #[error("gateway rejected request (HTTP {status}): {description}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Remote `bfs_responseCode`, when the body was decodable.
        code: Option<String>,
        /// Remote `bfs_responseDesc` or a fallback.
        description: String,
    },

    /// The gateway failed with an HTTP 5xx status.
    ///
    /// Same decoding as [`Rejected`](Self::Rejected) but signals a
    /// server-side fault. Retrying is at the caller's discretion.
    #[error("gateway server error (HTTP {status}): {description}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Remote `bfs_responseCode`, when the body was decodable.
        code: Option<String>,
        /// Remote `bfs_responseDesc` or a fallback.
        description: String,
    },

    /// Transport-level failure: connection refused, DNS failure, timeout,
    /// or an HTTP status outside the classified ranges.
    ///
    /// This is the only class recommended for automatic retry with backoff.
    #[error("network failure: {0}")]
    Network(String),

    /// Wrapper applied by each payment step around whatever went wrong
    /// underneath, so callers see one error surface per call.
    ///
    /// The original error is preserved in `source` and reachable through
    /// [`Error::cause`] and the standard `source()` chain.
    #[error("{step} failed: {source}")]
    Step {
        /// Which protocol step was executing.
        step: PaymentStep,
        /// The proximate cause.
        #[source]
        source: Box<Error>,
    },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl Error {
    /// Returns true when automatic retry with backoff is appropriate.
    ///
    /// Only network-class failures qualify; the check looks through a
    /// [`Step`](Self::Step) wrapper to the underlying cause.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self.cause(), Self::Network(_))
    }

    /// Returns the innermost error, unwrapping any [`Step`](Self::Step)
    /// layers.
    #[must_use]
    pub fn cause(&self) -> &Self {
        match self {
            Self::Step { source, .. } => source.cause(),
            other => other,
        }
    }

    /// Wraps this error as the outward-facing failure of `step`.
    ///
    /// An error that is already a step wrapper is returned unchanged, so
    /// nested helpers cannot double-wrap.
    pub fn into_step(self, step: PaymentStep) -> Self {
        match self {
            wrapped @ Self::Step { .. } => wrapped,
            source => Self::Step { step, source: Box::new(source) },
        }
    }

    /// Builds the business error for a response body with no `result` payload.
    pub(crate) fn missing_result() -> Self {
        Self::Business {
            code: String::new(),
            description: "gateway response did not include a result payload".to_owned(),
        }
    }
}
