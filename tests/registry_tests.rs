//! Handler registry resolution tests.
//!
//! These tests verify that:
//! 1. Handlers without a factory override resolve directly from the scope,
//!    and the negative probe result is memoized
//! 2. Handlers with a factory override always come from the factory
//! 3. Concurrent first-time resolution converges without corrupting the
//!    memoization snapshot
//! 4. `execute` runs a resolved handler end to end

use async_trait::async_trait;
use request_handler::{
	HandlerError, HandlerOutcome, HandlerRegistry, RequestHandler, ServiceScope,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
struct ReportHandler {
	source: &'static str,
}

struct AuditHandler;

#[test]
fn resolves_directly_when_no_factory_is_registered() {
	let scope = ServiceScope::new();
	scope.register(ReportHandler { source: "scope" });

	let registry = HandlerRegistry::new();
	let resolved = registry.resolve::<ReportHandler>(&scope).unwrap();

	// Same instance as a direct required lookup.
	let direct = scope.get_required::<ReportHandler>().unwrap();
	assert!(Arc::ptr_eq(&resolved, &direct));
	assert_eq!(resolved.source, "scope");
}

#[test]
fn factory_override_wins_over_direct_resolution() {
	let scope = ServiceScope::new();
	scope.register(ReportHandler { source: "scope" });
	scope.register_factory::<ReportHandler, _>(|_| Ok(Arc::new(ReportHandler { source: "factory" })));

	let registry = HandlerRegistry::new();
	for _ in 0..3 {
		let resolved = registry.resolve::<ReportHandler>(&scope).unwrap();
		assert_eq!(resolved.source, "factory");
	}
}

#[test]
fn factory_resolution_never_touches_direct_entry() {
	// No ReportHandler instance in the scope at all: a direct lookup would
	// fail, so success proves only the factory path ran.
	let scope = ServiceScope::new();
	scope.register_factory::<ReportHandler, _>(|_| Ok(Arc::new(ReportHandler { source: "factory" })));

	let registry = HandlerRegistry::new();
	let resolved = registry.resolve::<ReportHandler>(&scope).unwrap();
	assert_eq!(resolved.source, "factory");
}

#[test]
fn factory_receives_the_scope_it_resolves_from() {
	let scope = ServiceScope::new();
	scope.register(42u32);
	scope.register_factory::<ReportHandler, _>(|scope| {
		let _seed = scope.get_required::<u32>()?;
		Ok(Arc::new(ReportHandler { source: "seeded" }))
	});

	let registry = HandlerRegistry::new();
	let resolved = registry.resolve::<ReportHandler>(&scope).unwrap();
	assert_eq!(resolved.source, "seeded");
}

#[test]
fn failed_probe_is_memoized_as_negative() {
	let scope = ServiceScope::new();
	scope.register(ReportHandler { source: "scope" });

	let registry = HandlerRegistry::new();
	let first = registry.resolve::<ReportHandler>(&scope).unwrap();
	assert_eq!(first.source, "scope");

	// The first probe found no factory; the decision is cached, so a
	// factory registered afterwards is not consulted.
	scope.register_factory::<ReportHandler, _>(|_| Ok(Arc::new(ReportHandler { source: "late" })));
	let second = registry.resolve::<ReportHandler>(&scope).unwrap();
	assert_eq!(second.source, "scope");
}

#[test]
fn probe_decisions_are_per_handler_type() {
	let scope = ServiceScope::new();
	scope.register(ReportHandler { source: "scope" });
	scope.register(AuditHandler);
	scope.register_factory::<AuditHandler, _>(|_| Ok(Arc::new(AuditHandler)));

	let registry = HandlerRegistry::new();
	// A negative decision for one type must not leak into another.
	let report = registry.resolve::<ReportHandler>(&scope).unwrap();
	assert_eq!(report.source, "scope");
	assert!(registry.resolve::<AuditHandler>(&scope).is_ok());
}

#[test]
fn unregistered_handler_fails_loudly() {
	let scope = ServiceScope::new();
	let registry = HandlerRegistry::new();

	let missing = registry.resolve::<ReportHandler>(&scope);
	assert!(matches!(missing, Err(HandlerError::NotRegistered(_))));
	let message = missing.unwrap_err().to_string();
	assert!(message.contains("ReportHandler"));
}

#[test]
fn factory_errors_propagate() {
	let scope = ServiceScope::new();
	scope.register_factory::<ReportHandler, _>(|scope| {
		// Factory depends on a service that is never registered.
		let _missing = scope.get_required::<String>()?;
		Ok(Arc::new(ReportHandler { source: "unreachable" }))
	});

	let registry = HandlerRegistry::new();
	let result = registry.resolve::<ReportHandler>(&scope);
	assert!(matches!(result, Err(HandlerError::NotRegistered(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_first_resolution_converges() {
	let registry = Arc::new(HandlerRegistry::new());
	let scope = ServiceScope::new();
	scope.register(ReportHandler { source: "scope" });

	let mut joins = Vec::new();
	for _ in 0..64 {
		let registry = Arc::clone(&registry);
		let scope = scope.clone();
		joins.push(tokio::spawn(async move {
			let resolved = registry.resolve::<ReportHandler>(&scope).unwrap();
			assert_eq!(resolved.source, "scope");
		}));
	}
	for join in joins {
		join.await.unwrap();
	}

	// Every racer probed and memoized the same negative decision; once the
	// race settles, later factory registrations are ignored.
	scope.register_factory::<ReportHandler, _>(|_| Ok(Arc::new(ReportHandler { source: "late" })));
	let settled = registry.resolve::<ReportHandler>(&scope).unwrap();
	assert_eq!(settled.source, "scope");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_factory_resolution_always_uses_factory() {
	let registry = Arc::new(HandlerRegistry::new());
	let scope = ServiceScope::new();
	let built = Arc::new(AtomicUsize::new(0));

	let counter = Arc::clone(&built);
	scope.register_factory::<ReportHandler, _>(move |_| {
		counter.fetch_add(1, Ordering::SeqCst);
		Ok(Arc::new(ReportHandler { source: "factory" }))
	});

	let mut joins = Vec::new();
	for _ in 0..32 {
		let registry = Arc::clone(&registry);
		let scope = scope.clone();
		joins.push(tokio::spawn(async move {
			let resolved = registry.resolve::<ReportHandler>(&scope).unwrap();
			assert_eq!(resolved.source, "factory");
		}));
	}
	for join in joins {
		join.await.unwrap();
	}

	assert_eq!(built.load(Ordering::SeqCst), 32);
}

struct EchoHandler;

#[async_trait]
impl RequestHandler<String> for EchoHandler {
	type Output = HandlerOutcome<String>;

	async fn execute(&self, request: String) -> Self::Output {
		HandlerOutcome::ok(request)
	}
}

#[tokio::test]
async fn execute_resolves_and_runs_the_handler() {
	let scope = ServiceScope::new();
	scope.register(EchoHandler);

	let registry = HandlerRegistry::new();
	let outcome = registry
		.execute::<EchoHandler, _>(&scope, "ping".to_string())
		.await
		.unwrap();

	assert_eq!(outcome.value().map(String::as_str), Some("ping"));
}

#[tokio::test]
async fn execute_surfaces_resolution_errors() {
	let scope = ServiceScope::new();
	let registry = HandlerRegistry::new();

	let result = registry.execute::<EchoHandler, _>(&scope, "ping".to_string()).await;
	assert!(matches!(result, Err(HandlerError::NotRegistered(_))));
}
