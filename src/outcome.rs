//! Write-once tagged outcome for handler invocations.
//!
//! A [`HandlerOutcome<T>`] holds exactly one of three states: nothing yet,
//! a success value, or a [`Failure`] descriptor. The two setters are
//! write-once — a handler produces one outcome, and a second write is a
//! programming error that fails loudly instead of silently overwriting.
//!
//! # Examples
//!
//! ```
//! use request_handler::{Failure, HandlerOutcome};
//!
//! let ok: HandlerOutcome<u32> = HandlerOutcome::ok(7);
//! assert!(ok.has_value());
//!
//! let denied: HandlerOutcome<u32> = HandlerOutcome::fail(Failure::forbidden(None));
//! assert!(denied.has_failure());
//! ```

use crate::error::{HandlerError, HandlerResult};
use crate::response::{Failure, Response};
use serde::Serialize;
use std::any::type_name;

/// Outcome discriminant and payload. `Unset` is the initial state;
/// `Value` and `Failure` are terminal.
#[derive(Debug)]
enum State<T> {
	Unset,
	Value(T),
	Failure(Failure),
}

/// Tagged success/failure container for a handler invocation.
///
/// Distinguishes "no answer yet" from both success and failure, so
/// downstream code can branch exhaustively. Construct one empty and fill it
/// with [`set_value`](Self::set_value)/[`set_failure`](Self::set_failure),
/// or build it directly with [`ok`](Self::ok)/[`fail`](Self::fail).
///
/// A `HandlerOutcome` is written by a single producer; once a value or
/// failure is stored it is immutable and freely shareable for reads.
#[derive(Debug)]
pub struct HandlerOutcome<T> {
	state: State<T>,
}

impl<T> HandlerOutcome<T> {
	/// Creates an unset outcome.
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::HandlerOutcome;
	///
	/// let outcome: HandlerOutcome<u32> = HandlerOutcome::new();
	/// assert!(!outcome.has_value());
	/// assert!(!outcome.has_failure());
	/// ```
	pub fn new() -> Self {
		Self { state: State::Unset }
	}

	/// Creates an outcome carrying a success value.
	pub fn ok(value: T) -> Self {
		Self {
			state: State::Value(value),
		}
	}

	/// Creates an outcome carrying a failure descriptor.
	pub fn fail(failure: Failure) -> Self {
		Self {
			state: State::Failure(failure),
		}
	}

	/// Stores the success value. Write-once.
	///
	/// Passing `None` while no value is stored is a no-op. Any write after
	/// a value or failure is stored fails with
	/// [`HandlerError::ValueAlreadySet`] or
	/// [`HandlerError::FailureAlreadySet`].
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::{HandlerError, HandlerOutcome};
	///
	/// let mut outcome = HandlerOutcome::new();
	/// outcome.set_value(Some(1)).unwrap();
	///
	/// let again = outcome.set_value(Some(2));
	/// assert!(matches!(again, Err(HandlerError::ValueAlreadySet)));
	/// ```
	pub fn set_value(&mut self, value: Option<T>) -> HandlerResult<()> {
		let Some(value) = value else {
			return match self.state {
				State::Value(_) => Err(HandlerError::ValueAlreadySet),
				_ => Ok(()),
			};
		};
		match self.state {
			State::Unset => {
				self.state = State::Value(value);
				Ok(())
			}
			State::Value(_) => Err(HandlerError::ValueAlreadySet),
			State::Failure(_) => Err(HandlerError::FailureAlreadySet),
		}
	}

	/// Stores the failure descriptor. Write-once, symmetric to
	/// [`set_value`](Self::set_value).
	pub fn set_failure(&mut self, failure: Option<Failure>) -> HandlerResult<()> {
		let Some(failure) = failure else {
			return match self.state {
				State::Failure(_) => Err(HandlerError::FailureAlreadySet),
				_ => Ok(()),
			};
		};
		match self.state {
			State::Unset => {
				self.state = State::Failure(failure);
				Ok(())
			}
			State::Value(_) => Err(HandlerError::ValueAlreadySet),
			State::Failure(_) => Err(HandlerError::FailureAlreadySet),
		}
	}

	/// Whether a success value is stored.
	pub fn has_value(&self) -> bool {
		matches!(self.state, State::Value(_))
	}

	/// Whether a failure descriptor is stored.
	pub fn has_failure(&self) -> bool {
		matches!(self.state, State::Failure(_))
	}

	/// Non-erroring probe for the success value.
	pub fn value(&self) -> Option<&T> {
		match &self.state {
			State::Value(value) => Some(value),
			_ => None,
		}
	}

	/// Non-erroring probe for the failure descriptor.
	pub fn failure(&self) -> Option<&Failure> {
		match &self.state {
			State::Failure(failure) => Some(failure),
			_ => None,
		}
	}

	/// Returns the success value, failing loudly otherwise.
	///
	/// The error distinguishes a stored failure
	/// ([`HandlerError::FailurePresent`]) from an outcome that was never
	/// written ([`HandlerError::NothingSet`]).
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::{Failure, HandlerError, HandlerOutcome};
	///
	/// let outcome = HandlerOutcome::ok("done");
	/// assert_eq!(*outcome.value_or_fail().unwrap(), "done");
	///
	/// let failed: HandlerOutcome<&str> = HandlerOutcome::fail(Failure::forbidden(None));
	/// assert!(matches!(
	/// 	failed.value_or_fail(),
	/// 	Err(HandlerError::FailurePresent(_))
	/// ));
	/// ```
	pub fn value_or_fail(&self) -> HandlerResult<&T> {
		match &self.state {
			State::Value(value) => Ok(value),
			State::Failure(_) => Err(HandlerError::FailurePresent(type_name::<T>())),
			State::Unset => Err(HandlerError::NothingSet(type_name::<T>())),
		}
	}

	/// Consumes the outcome and returns the success value, with the same
	/// error contract as [`value_or_fail`](Self::value_or_fail).
	pub fn into_value(self) -> HandlerResult<T> {
		match self.state {
			State::Value(value) => Ok(value),
			State::Failure(_) => Err(HandlerError::FailurePresent(type_name::<T>())),
			State::Unset => Err(HandlerError::NothingSet(type_name::<T>())),
		}
	}

	/// Applies exactly one callback, chosen by the outcome's state.
	///
	/// `on_value` is always required; the other arms are optional. When the
	/// arm matching the current state was not supplied the call fails with
	/// [`HandlerError::CaseNotDefined`] — there is no silent default.
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::{Failure, HandlerError, HandlerOutcome};
	///
	/// let outcome = HandlerOutcome::ok(2);
	/// let doubled = outcome
	/// 	.map(|v| v * 2, Some(|_f: &Failure| 0), Some(|| -1))
	/// 	.unwrap();
	/// assert_eq!(doubled, 4);
	///
	/// let failed: HandlerOutcome<i32> = HandlerOutcome::fail(Failure::forbidden(None));
	/// let unmatched = failed.map(|v| v * 2, None::<fn(&Failure) -> i32>, None::<fn() -> i32>);
	/// assert!(matches!(unmatched, Err(HandlerError::CaseNotDefined)));
	/// ```
	pub fn map<R, FV, FF, FN>(
		&self,
		on_value: FV,
		on_failure: Option<FF>,
		on_none: Option<FN>,
	) -> HandlerResult<R>
	where
		FV: FnOnce(&T) -> R,
		FF: FnOnce(&Failure) -> R,
		FN: FnOnce() -> R,
	{
		match &self.state {
			State::Value(value) => Ok(on_value(value)),
			State::Failure(failure) => on_failure
				.map(|f| f(failure))
				.ok_or(HandlerError::CaseNotDefined),
			State::Unset => on_none.map(|f| f()).ok_or(HandlerError::CaseNotDefined),
		}
	}

	/// [`map`](Self::map) with an extra context argument threaded to
	/// whichever callback fires, so call sites with external state avoid a
	/// capturing closure.
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::{Failure, HandlerOutcome};
	///
	/// let outcome = HandlerOutcome::ok(3);
	/// let scaled = outcome
	/// 	.map_with(
	/// 		10,
	/// 		|factor, v| factor * v,
	/// 		Some(|_factor, _f: &Failure| 0),
	/// 		Some(|_factor| -1),
	/// 	)
	/// 	.unwrap();
	/// assert_eq!(scaled, 30);
	/// ```
	pub fn map_with<A, R, FV, FF, FN>(
		&self,
		args: A,
		on_value: FV,
		on_failure: Option<FF>,
		on_none: Option<FN>,
	) -> HandlerResult<R>
	where
		FV: FnOnce(A, &T) -> R,
		FF: FnOnce(A, &Failure) -> R,
		FN: FnOnce(A) -> R,
	{
		match &self.state {
			State::Value(value) => Ok(on_value(args, value)),
			State::Failure(failure) => on_failure
				.map(|f| f(args, failure))
				.ok_or(HandlerError::CaseNotDefined),
			State::Unset => on_none.map(|f| f(args)).ok_or(HandlerError::CaseNotDefined),
		}
	}

	/// Side-effecting three-way branch. All arms are optional; an arm
	/// missing for the current state is skipped silently.
	pub fn handle<A, FV, FF, FN>(
		&self,
		args: A,
		on_value: Option<FV>,
		on_failure: Option<FF>,
		on_none: Option<FN>,
	) where
		FV: FnOnce(A, &T),
		FF: FnOnce(A, &Failure),
		FN: FnOnce(A),
	{
		match &self.state {
			State::Value(value) => {
				if let Some(f) = on_value {
					f(args, value);
				}
			}
			State::Failure(failure) => {
				if let Some(f) = on_failure {
					f(args, failure);
				}
			}
			State::Unset => {
				if let Some(f) = on_none {
					f(args);
				}
			}
		}
	}
}

impl<T: Serialize> HandlerOutcome<T> {
	/// Converts the outcome into a protocol response.
	///
	/// A value becomes a 200 response with a JSON body; a failure converts
	/// via [`Failure::into_response`]; an unset outcome never disappears
	/// silently — it becomes a bare 500 response.
	///
	/// # Examples
	///
	/// ```
	/// use http::StatusCode;
	/// use request_handler::HandlerOutcome;
	///
	/// let response = HandlerOutcome::ok("ready").into_response();
	/// assert_eq!(response.status, StatusCode::OK);
	///
	/// let unset: HandlerOutcome<&str> = HandlerOutcome::new();
	/// assert_eq!(
	/// 	unset.into_response().status,
	/// 	StatusCode::INTERNAL_SERVER_ERROR
	/// );
	/// ```
	pub fn into_response(self) -> Response {
		match self.state {
			State::Value(value) => Response::ok()
				.with_json(&value)
				.unwrap_or_else(|_| Response::internal_server_error()),
			State::Failure(failure) => failure.into_response(),
			State::Unset => Response::internal_server_error(),
		}
	}
}

impl<T> Default for HandlerOutcome<T> {
	fn default() -> Self {
		Self::new()
	}
}

/// Wraps a bare failure descriptor, transferring it into a fresh outcome.
impl<T> From<Failure> for HandlerOutcome<T> {
	fn from(failure: Failure) -> Self {
		Self::fail(failure)
	}
}
