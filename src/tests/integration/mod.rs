//! Integration tests
//!
//! Registry behavior end to end, and the HTTP transport driven through
//! `warp::test` against a registry built from configuration.

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::application::{MethodRegistry, RegistrySetup};
use crate::domain::{CallResult, FailureKind, MethodCall};
use crate::infrastructure::HttpServer;
use crate::tests::common::{
    call, CountingMethod, Event, FailingMethod, RecordingDiagnostics, SlowMethod,
};

/// Registry scenarios
pub mod registry {
    use super::*;

    #[tokio::test]
    async fn test_echo_returns_parameter_value() {
        crate::tests::config::init();
        let mut registry = MethodRegistry::new();
        registry.register_fn("echo", |call: MethodCall| async move {
            Ok(call.parameter["value"].clone())
        });

        let result = registry.dispatch(&call("echo", json!({"value": "x"}))).await;

        assert_eq!(result, CallResult::Success(json!("x")));
    }

    #[tokio::test]
    async fn test_missing_method_on_empty_registry() {
        let registry = MethodRegistry::new();

        let result = registry
            .dispatch(&MethodCall {
                method: Some("missing".to_string()),
                parameter: Value::Null,
            })
            .await;

        let wire = result.into_value();
        assert!(wire["error"].as_str().unwrap().contains("missing"));
        assert_eq!(wire["method"], "missing");
    }

    #[tokio::test]
    async fn test_failing_handler_message_is_generic() {
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let mut registry = MethodRegistry::new().with_diagnostics(diagnostics.clone());
        registry.register_fn("boom", |_call: MethodCall| async move {
            Err(anyhow::anyhow!("boom"))
        });

        let result = registry.dispatch(&call("boom", json!({}))).await;

        let failure = result.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::ExecutionError);
        assert!(!failure.message.contains("boom"));
        assert_eq!(
            diagnostics.events(),
            vec![
                Event::Failed {
                    method: "boom".to_string(),
                    cause: "boom".to_string(),
                },
                Event::Completed {
                    method: "boom".to_string(),
                    success: false,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_capability_object_returns_value() {
        let mut registry = MethodRegistry::new();
        let counter = Arc::new(CountingMethod::default());
        registry.register("obj", counter.clone());

        let first = registry.dispatch(&call("obj", Value::Null)).await;
        let second = registry.dispatch(&call("obj", Value::Null)).await;

        assert_eq!(first.value(), Some(&json!(1)));
        assert_eq!(second.value(), Some(&json!(2)));
        assert_eq!(counter.calls(), 2);
    }

    #[tokio::test]
    async fn test_reregistration_invokes_only_second_handler() {
        let first = Arc::new(CountingMethod::default());
        let second = Arc::new(CountingMethod::default());
        let mut registry = MethodRegistry::new();
        registry.register("count", first.clone());
        registry.register("count", second.clone());

        registry.dispatch(&call("count", Value::Null)).await;

        assert_eq!(first.calls(), 0);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_names_never_throw() {
        let mut registry = MethodRegistry::new();
        registry.register_fn("known", |_call: MethodCall| async move { Ok(Value::Null) });

        for name in ["", "Known", "known ", "unknown", "ünïcødé", "a.b.c"] {
            let result = registry.dispatch(&call(name, json!({"x": 1}))).await;
            assert_eq!(
                result.failure().map(|f| f.kind),
                Some(FailureKind::MethodNotSupported),
                "name {:?}",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_failing_handler_does_not_disturb_concurrent_calls() {
        let mut registry = MethodRegistry::new();
        registry.register(
            "fail",
            Arc::new(FailingMethod {
                message: "disk full".to_string(),
            }),
        );
        registry.register(
            "slow",
            Arc::new(SlowMethod {
                delay: Duration::from_millis(20),
            }),
        );
        let registry = Arc::new(registry);

        let slow_calls = (0..8).map(|i| {
            let registry = registry.clone();
            tokio::spawn(async move { registry.dispatch(&call("slow", json!(i))).await })
        });
        let failing_calls = (0..8).map(|_| {
            let registry = registry.clone();
            tokio::spawn(async move { registry.dispatch(&call("fail", Value::Null)).await })
        });

        let slow = futures::future::join_all(slow_calls).await;
        let failed = futures::future::join_all(failing_calls).await;

        for (i, result) in slow.into_iter().enumerate() {
            assert_eq!(result.unwrap().value(), Some(&json!(i)));
        }
        for result in failed {
            let result = result.unwrap();
            assert!(!result.failure().unwrap().message.contains("disk"));
        }
    }

    #[tokio::test]
    async fn test_diagnostics_per_outcome() {
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let mut registry = MethodRegistry::new().with_diagnostics(diagnostics.clone());
        registry.register("obj", Arc::new(CountingMethod::default()));
        registry.register_alias("dangling", "gone");

        registry.dispatch(&call("obj", Value::Null)).await;
        registry.dispatch(&call("nothing", Value::Null)).await;
        registry.dispatch(&call("dangling", Value::Null)).await;

        assert_eq!(
            diagnostics.events(),
            vec![
                Event::Completed {
                    method: "obj".to_string(),
                    success: true,
                },
                Event::NotFound("nothing".to_string()),
                Event::Defect("dangling".to_string()),
            ]
        );
    }

    #[test]
    fn test_dispatch_from_blocking_context() {
        let mut registry = MethodRegistry::new();
        registry.register_typed("add", |pair: (i64, i64)| async move { Ok(pair.0 + pair.1) });

        let result = tokio_test::block_on(registry.dispatch(&call("add", json!([40, 2]))));

        assert_eq!(result.value(), Some(&json!(42)));
    }
}

/// HTTP transport scenarios
pub mod http {
    use super::*;

    fn server_with(registry: MethodRegistry) -> HttpServer {
        HttpServer::new(crate::tests::config::test_config(), Arc::new(registry), None)
    }

    #[tokio::test]
    async fn test_object_handler_over_http() {
        let mut registry = MethodRegistry::new();
        registry.register("obj", Arc::new(CountingMethod::default()));
        let server = server_with(registry);
        let routes = server.routes();

        let res = warp::test::request()
            .method("POST")
            .path("/call")
            .json(&json!({"method": "obj", "parameter": null}))
            .reply(&routes)
            .await;

        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body, json!(1));
    }

    #[tokio::test]
    async fn test_timeout_becomes_execution_failure() {
        let mut registry = MethodRegistry::new();
        registry.register(
            "stuck",
            Arc::new(SlowMethod {
                delay: Duration::from_secs(5),
            }),
        );
        let server = server_with(registry);
        let routes = server.routes();

        let res = warp::test::request()
            .method("POST")
            .path("/call")
            .json(&json!({"methodName": "stuck", "parameter": {}}))
            .reply(&routes)
            .await;

        assert_eq!(res.status(), 200);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["method"], "stuck");
        assert_eq!(
            body["error"],
            "There was an error while executing the remote method."
        );
    }

    #[tokio::test]
    async fn test_timeout_reaches_diagnostics() {
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let mut registry = MethodRegistry::new().with_diagnostics(diagnostics.clone());
        registry.register(
            "stuck",
            Arc::new(SlowMethod {
                delay: Duration::from_secs(5),
            }),
        );
        let server = server_with(registry);
        let routes = server.routes();

        warp::test::request()
            .method("POST")
            .path("/call")
            .json(&json!({"method": "stuck"}))
            .reply(&routes)
            .await;

        assert_eq!(
            diagnostics.events(),
            vec![
                Event::Failed {
                    method: "stuck".to_string(),
                    cause: "timed out after 1000 ms".to_string(),
                },
                Event::Completed {
                    method: "stuck".to_string(),
                    success: false,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_configured_alias_over_http() {
        let app_config = crate::config::AppConfig::from_toml_str(
            r#"
            [dispatch]
            metrics_enabled = false

            [dispatch.aliases]
            "system.ping" = "ping"
            "broken" = "does.not.exist"
            "#,
        )
        .unwrap();
        let setup = RegistrySetup::from_config(&app_config.dispatch).unwrap();
        let server = HttpServer::new(app_config, Arc::new(setup.registry), setup.metrics);
        let routes = server.routes();

        let res = warp::test::request()
            .method("POST")
            .path("/call")
            .json(&json!({"method": "system.ping"}))
            .reply(&routes)
            .await;
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body, json!("pong"));

        let res = warp::test::request()
            .method("POST")
            .path("/call")
            .json(&json!({"method": "broken"}))
            .reply(&routes)
            .await;
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["method"], "broken");
        assert!(!body["error"].as_str().unwrap().contains("does.not.exist"));
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut app_config = crate::tests::config::test_config();
        app_config.server.max_request_size = 1024;
        let mut registry = MethodRegistry::new();
        crate::application::register_builtins(&mut registry);
        let server = HttpServer::new(app_config, Arc::new(registry), None);
        let routes = server.routes();

        let res = warp::test::request()
            .method("POST")
            .path("/call")
            .json(&json!({"method": "echo", "parameter": "x".repeat(4096)}))
            .reply(&routes)
            .await;

        assert_eq!(res.status(), 413);
    }
}
