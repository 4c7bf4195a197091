//! Request handler traits.

use crate::outcome::HandlerOutcome;
use async_trait::async_trait;

/// A unit of logic that takes a request value and produces an output.
///
/// Handlers are resolved through a
/// [`HandlerRegistry`](crate::registry::HandlerRegistry) and invoked
/// asynchronously. The output is whatever the handler's call sites expect —
/// most handlers return a [`HandlerOutcome`], see [`OutcomeHandler`].
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use request_handler::{HandlerOutcome, RequestHandler};
///
/// struct LookupUser;
///
/// struct UserQuery {
/// 	id: u64,
/// }
///
/// #[async_trait]
/// impl RequestHandler<UserQuery> for LookupUser {
/// 	type Output = HandlerOutcome<String>;
///
/// 	async fn execute(&self, request: UserQuery) -> Self::Output {
/// 		HandlerOutcome::ok(format!("user-{}", request.id))
/// 	}
/// }
/// ```
#[async_trait]
pub trait RequestHandler<Request>: Send + Sync
where
	Request: Send,
{
	/// The handler's result type.
	type Output: Send;

	/// Executes the handler against a request.
	async fn execute(&self, request: Request) -> Self::Output;
}

/// Marker for handlers whose output is a [`HandlerOutcome`].
///
/// Implemented automatically for every
/// [`RequestHandler<Request, Output = HandlerOutcome<Value>>`](RequestHandler).
pub trait OutcomeHandler<Request, Value>:
	RequestHandler<Request, Output = HandlerOutcome<Value>>
where
	Request: Send,
	Value: Send,
{
}

impl<H, Request, Value> OutcomeHandler<Request, Value> for H
where
	H: RequestHandler<Request, Output = HandlerOutcome<Value>> + ?Sized,
	Request: Send,
	Value: Send,
{
}
