//! Handler resolution with type-specific factory overrides.
//!
//! A [`HandlerRegistry`] answers one question: given a handler type `H` and
//! a [`ServiceScope`], which construction path produces the instance? A
//! registered [`HandlerFactory<H>`] wins; otherwise the handler is looked
//! up directly in the scope. Whether a factory exists for `H` is decided
//! once and memoized, so steady-state resolution does a single map lookup
//! before taking the direct path.

use crate::error::HandlerResult;
use crate::handler::RequestHandler;
use crate::scope::ServiceScope;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

type CreateFn<H> = Box<dyn Fn(&ServiceScope) -> HandlerResult<Arc<H>> + Send + Sync>;

/// Type-specific construction override for handler type `H`.
///
/// Registering a `HandlerFactory<H>` in a scope redirects every registry
/// resolution of `H` through the factory instead of the scope's own entry
/// for `H`. Most callers use
/// [`ServiceScope::register_factory`](crate::scope::ServiceScope::register_factory)
/// rather than constructing one directly.
pub struct HandlerFactory<H> {
	create: CreateFn<H>,
}

impl<H: Any + Send + Sync> HandlerFactory<H> {
	/// Wraps a construction closure as a factory override.
	pub fn new<F>(create: F) -> Self
	where
		F: Fn(&ServiceScope) -> HandlerResult<Arc<H>> + Send + Sync + 'static,
	{
		Self {
			create: Box::new(create),
		}
	}

	/// Builds a handler instance from the given scope.
	pub fn create(&self, scope: &ServiceScope) -> HandlerResult<Arc<H>> {
		(self.create)(scope)
	}
}

/// Resolves handler instances, preferring factory overrides.
///
/// The registry is shared process-wide (wrap it in an `Arc` and hand it to
/// every request). Per handler type it memoizes whether a factory override
/// exists, so types without one skip the factory probe on every call after
/// the first.
///
/// The memoization map is copy-on-write: readers clone an `Arc` snapshot
/// and never observe a partially written map; writers install a fresh map.
/// Concurrent first probes of the same type race benignly — both writers
/// derive the same entry.
///
/// # Examples
///
/// ```
/// use request_handler::{HandlerRegistry, ServiceScope};
///
/// struct PingHandler;
///
/// let scope = ServiceScope::new();
/// scope.register(PingHandler);
///
/// let registry = HandlerRegistry::new();
/// let handler = registry.resolve::<PingHandler>(&scope).unwrap();
/// ```
#[derive(Default)]
pub struct HandlerRegistry {
	factory_overrides: RwLock<Arc<HashMap<TypeId, bool>>>,
}

impl HandlerRegistry {
	/// Creates a registry with an empty memoization map.
	pub fn new() -> Self {
		Self {
			factory_overrides: RwLock::new(Arc::new(HashMap::new())),
		}
	}

	/// Resolves an instance of handler type `H` from the scope.
	///
	/// Resolution order:
	///
	/// 1. If the memoization map says `H` has no factory override, look up
	///    `H` directly via [`ServiceScope::get_required`].
	/// 2. Otherwise probe the scope for a [`HandlerFactory<H>`]. A found
	///    factory builds and returns the instance. On the first probe for
	///    `H` the outcome (factory present or not) is memoized, so a
	///    factory registered only *after* a factory-less first resolution
	///    of `H` is not consulted.
	/// 3. With no factory, fall through to the direct lookup, which fails
	///    loudly with [`HandlerError::NotRegistered`] when `H` itself is
	///    not in the scope.
	///
	/// Exactly one construction path runs per call; the memoization write
	/// is the only side effect.
	///
	/// [`HandlerError::NotRegistered`]: crate::error::HandlerError::NotRegistered
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::{HandlerRegistry, ServiceScope};
	/// use std::sync::Arc;
	///
	/// struct ReportHandler {
	/// 	source: &'static str,
	/// }
	///
	/// let scope = ServiceScope::new();
	/// scope.register(ReportHandler { source: "scope" });
	/// scope.register_factory::<ReportHandler, _>(|_| Ok(Arc::new(ReportHandler { source: "factory" })));
	///
	/// let registry = HandlerRegistry::new();
	/// let handler = registry.resolve::<ReportHandler>(&scope).unwrap();
	/// assert_eq!(handler.source, "factory");
	/// ```
	pub fn resolve<H: Any + Send + Sync>(&self, scope: &ServiceScope) -> HandlerResult<Arc<H>> {
		let snapshot = {
			let guard = self
				.factory_overrides
				.read()
				.unwrap_or_else(PoisonError::into_inner);
			Arc::clone(&guard)
		};

		let key = TypeId::of::<H>();
		let memoized = snapshot.get(&key).copied();

		if memoized.unwrap_or(true) {
			let factory = scope.get::<HandlerFactory<H>>();
			if memoized.is_none() {
				self.record_override(key, factory.is_some());
				tracing::debug!(
					handler = type_name::<H>(),
					has_factory = factory.is_some(),
					"memoized factory probe"
				);
			}
			if let Some(factory) = factory {
				tracing::debug!(handler = type_name::<H>(), "resolving via factory override");
				return factory.create(scope);
			}
		}

		tracing::trace!(handler = type_name::<H>(), "resolving directly from scope");
		scope.get_required::<H>()
	}

	/// Resolves handler `H` and executes it against the request.
	///
	/// # Examples
	///
	/// ```
	/// use async_trait::async_trait;
	/// use request_handler::{HandlerOutcome, HandlerRegistry, RequestHandler, ServiceScope};
	///
	/// struct EchoHandler;
	///
	/// #[async_trait]
	/// impl RequestHandler<String> for EchoHandler {
	/// 	type Output = HandlerOutcome<String>;
	///
	/// 	async fn execute(&self, request: String) -> Self::Output {
	/// 		HandlerOutcome::ok(request)
	/// 	}
	/// }
	///
	/// # #[tokio::main(flavor = "current_thread")]
	/// # async fn main() {
	/// let scope = ServiceScope::new();
	/// scope.register(EchoHandler);
	///
	/// let registry = HandlerRegistry::new();
	/// let outcome = registry
	/// 	.execute::<EchoHandler, _>(&scope, "ping".to_string())
	/// 	.await
	/// 	.unwrap();
	/// assert_eq!(outcome.value().map(String::as_str), Some("ping"));
	/// # }
	/// ```
	pub async fn execute<H, Request>(
		&self,
		scope: &ServiceScope,
		request: Request,
	) -> HandlerResult<H::Output>
	where
		H: RequestHandler<Request> + Any,
		Request: Send,
	{
		let handler = self.resolve::<H>(scope)?;
		Ok(handler.execute(request).await)
	}

	/// Installs a new map with the probe outcome for `key`. The whole map
	/// is replaced so concurrent readers keep their consistent snapshot.
	fn record_override(&self, key: TypeId, has_factory: bool) {
		let mut guard = self
			.factory_overrides
			.write()
			.unwrap_or_else(PoisonError::into_inner);
		let mut next = (**guard).clone();
		next.insert(key, has_factory);
		*guard = Arc::new(next);
	}
}
