//! Error types for handler resolution and outcome handling.
//!
//! Every variant here is a configuration or programming error: it signals a
//! misuse of the crate's contracts (write-once violations, reads without
//! data, unregistered services). Expected domain failures such as
//! `Forbidden` or `BadRequest` are *not* errors — they travel as
//! [`Failure`](crate::response::Failure) values inside a
//! [`HandlerOutcome`](crate::outcome::HandlerOutcome).

use thiserror::Error;

/// Result type for handler operations.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Errors raised by the handler registry, the service scope, and the
/// outcome container.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HandlerError {
	/// Required resolution failed: no service of the requested type.
	#[error("no service registered for type {0}")]
	NotRegistered(&'static str),

	/// A value was already stored in the outcome.
	#[error("value is already set")]
	ValueAlreadySet,

	/// A failure was already stored in the outcome.
	#[error("failure is already set")]
	FailureAlreadySet,

	/// The outcome holds a failure where a value was requested.
	#[error("no value of type {0}, but a failure is present")]
	FailurePresent(&'static str),

	/// The outcome holds neither a value nor a failure.
	#[error("no value of type {0} and no failure")]
	NothingSet(&'static str),

	/// No callback was supplied for the outcome's current state.
	#[error("no callback defined for the current outcome")]
	CaseNotDefined,

	/// Response body serialization failed.
	#[error("serialization error: {0}")]
	Serialization(String),
}
