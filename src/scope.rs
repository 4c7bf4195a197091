//! Scoped service resolution.
//!
//! A [`ServiceScope`] is a per-request, type-keyed lookup table: services
//! are registered by value and retrieved by type. It provides the two
//! capabilities the handler registry builds on — optional lookup
//! ([`get`](ServiceScope::get)) and required lookup
//! ([`get_required`](ServiceScope::get_required)).

use crate::error::{HandlerError, HandlerResult};
use crate::registry::HandlerFactory;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Type-keyed service container for a single request scope.
#[derive(Clone, Default)]
pub struct ServiceScope {
	entries: Arc<RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>>,
}

impl ServiceScope {
	/// Creates a new empty scope.
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::ServiceScope;
	///
	/// let scope = ServiceScope::new();
	/// assert!(scope.get::<i32>().is_none());
	/// ```
	pub fn new() -> Self {
		Self {
			entries: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Registers a service by its type.
	///
	/// A later registration of the same type replaces the earlier one.
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::ServiceScope;
	///
	/// let scope = ServiceScope::new();
	/// scope.register(42i32);
	/// scope.register("hello".to_string());
	///
	/// assert_eq!(*scope.get::<i32>().unwrap(), 42);
	/// assert_eq!(*scope.get::<String>().unwrap(), "hello");
	/// ```
	pub fn register<T: Any + Send + Sync>(&self, value: T) {
		let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
		entries.insert(TypeId::of::<T>(), Arc::new(value));
	}

	/// Registers a pre-wrapped `Arc<T>`, avoiding an unwrap/re-wrap when the
	/// value already lives behind shared ownership.
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::ServiceScope;
	/// use std::sync::Arc;
	///
	/// let scope = ServiceScope::new();
	/// let value = Arc::new(42i32);
	/// scope.register_arc(value);
	///
	/// assert_eq!(*scope.get::<i32>().unwrap(), 42);
	/// ```
	pub fn register_arc<T: Any + Send + Sync>(&self, value: Arc<T>) {
		let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
		entries.insert(TypeId::of::<T>(), value);
	}

	/// Registers a factory override for handler type `H`.
	///
	/// When a [`HandlerRegistry`](crate::registry::HandlerRegistry) resolves
	/// `H` from this scope, the factory is used instead of a direct lookup.
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::{HandlerRegistry, ServiceScope};
	/// use std::sync::Arc;
	///
	/// struct Greeter {
	/// 	greeting: &'static str,
	/// }
	///
	/// let scope = ServiceScope::new();
	/// scope.register_factory::<Greeter, _>(|_scope| Ok(Arc::new(Greeter { greeting: "hi" })));
	///
	/// let registry = HandlerRegistry::new();
	/// let greeter = registry.resolve::<Greeter>(&scope).unwrap();
	/// assert_eq!(greeter.greeting, "hi");
	/// ```
	pub fn register_factory<H, F>(&self, create: F)
	where
		H: Any + Send + Sync,
		F: Fn(&ServiceScope) -> HandlerResult<Arc<H>> + Send + Sync + 'static,
	{
		self.register(HandlerFactory::new(create));
	}

	/// Optional lookup: returns the service of type `T`, or `None` when no
	/// such service is registered.
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::ServiceScope;
	///
	/// let scope = ServiceScope::new();
	/// scope.register(42i32);
	///
	/// assert_eq!(*scope.get::<i32>().unwrap(), 42);
	/// assert!(scope.get::<String>().is_none());
	/// ```
	pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
		entries
			.get(&TypeId::of::<T>())
			.and_then(|arc| arc.clone().downcast::<T>().ok())
	}

	/// Required lookup: returns the service of type `T`, or
	/// [`HandlerError::NotRegistered`] when absent.
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::{HandlerError, ServiceScope};
	///
	/// let scope = ServiceScope::new();
	///
	/// let missing = scope.get_required::<i32>();
	/// assert!(matches!(missing, Err(HandlerError::NotRegistered(_))));
	/// ```
	pub fn get_required<T: Any + Send + Sync>(&self) -> HandlerResult<Arc<T>> {
		self.get::<T>()
			.ok_or_else(|| HandlerError::NotRegistered(std::any::type_name::<T>()))
	}
}
