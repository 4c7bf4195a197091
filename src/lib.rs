//! # request-handler
//!
//! Scoped request-handler resolution for web services, plus a write-once
//! outcome type for what handlers return.
//!
//! ## Features
//!
//! - **Type-keyed resolution**: handlers are resolved from a
//!   [`ServiceScope`] by type, with an optional per-type
//!   [`HandlerFactory`] override taking precedence over the direct lookup.
//! - **Memoized factory probing**: whether a handler type has a factory
//!   override is decided once and cached copy-on-write, so concurrent
//!   readers always see a consistent snapshot and steady-state resolution
//!   stays cheap.
//! - **Write-once outcomes**: [`HandlerOutcome`] holds exactly one of
//!   {nothing, value, failure}; a second write fails loudly.
//! - **Failures as data**: [`Failure`] describes forbidden/bad-request/
//!   error outcomes with status codes and optional diagnostics, and
//!   converts 1:1 into a protocol [`Response`].
//!
//! ## Example
//!
//! ```
//! use http::StatusCode;
//! use request_handler::{Failure, HandlerOutcome, HandlerRegistry, ServiceScope};
//!
//! struct AuditHandler;
//!
//! // Per-request scope: register services, then resolve handlers by type.
//! let scope = ServiceScope::new();
//! scope.register(AuditHandler);
//!
//! let registry = HandlerRegistry::new();
//! let _handler = registry.resolve::<AuditHandler>(&scope).unwrap();
//!
//! // Handler outcomes carry either a value or a failure descriptor.
//! let outcome: HandlerOutcome<&str> = HandlerOutcome::fail(Failure::forbidden(None));
//! assert_eq!(outcome.into_response().status, StatusCode::FORBIDDEN);
//! ```
//!
//! Routing, request parsing, middleware, and validation are out of scope:
//! this crate only decides *which* handler answers a type request and
//! represents *what kind of answer* it produced.

pub mod error;
pub mod handler;
pub mod outcome;
pub mod registry;
pub mod response;
pub mod scope;

pub use error::{HandlerError, HandlerResult};
pub use handler::{OutcomeHandler, RequestHandler};
pub use outcome::HandlerOutcome;
pub use registry::{HandlerFactory, HandlerRegistry};
pub use response::{BoxError, Failure, Response};
pub use scope::ServiceScope;
