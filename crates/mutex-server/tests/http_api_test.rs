//! Integration tests for the lock HTTP API
//!
//! Each scenario runs against a fresh registry wired with the same middleware
//! and routes as the production server. Concurrent scenarios run against a
//! real multi-worker server.

use std::io::Write;
use std::sync::Arc;

use actix_web::{App, dev::ServerHandle, http::StatusCode, http::header, test, web};

use mutex_server::{
    Configuration, LockRegistry, ServerArgs, api::route::routes, middleware::RequestLogger,
    middleware::cors, startup,
};

use clap::Parser;

macro_rules! lock_app {
    ($registry:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestLogger::new())
                .wrap(cors())
                .app_data($registry.clone())
                .service(routes()),
        )
        .await
    };
}

/// Run `paths` in order against a fresh service and collect the status codes
macro_rules! run_scenario {
    ($paths:expr) => {{
        let registry = web::Data::new(LockRegistry::new());
        let app = lock_app!(registry);
        let mut statuses = Vec::new();
        for path in $paths {
            let req = test::TestRequest::get()
                .uri(&format!("/{}", path))
                .to_request();
            let resp = test::call_service(&app, req).await;
            statuses.push(resp.status());
        }
        statuses
    }};
}

const OK: StatusCode = StatusCode::OK;
const ACCEPTED: StatusCode = StatusCode::ACCEPTED;
const CONFLICT: StatusCode = StatusCode::CONFLICT;
const LOCKED: StatusCode = StatusCode::LOCKED;

// ============================================================================
// Serial scenarios
// ============================================================================

#[actix_web::test]
async fn test_lock_unlock_status() {
    let statuses = run_scenario!(["lock?key=blah", "unlock?key=blah", "status?key=blah"]);
    assert_eq!(statuses, vec![ACCEPTED, ACCEPTED, OK]);
}

#[actix_web::test]
async fn test_rlock_blocks_lock_until_runlock() {
    let statuses = run_scenario!([
        "rlock?key=blah",
        "lock?key=blah",
        "runlock?key=blah",
        "lock?key=blah"
    ]);
    assert_eq!(statuses, vec![ACCEPTED, CONFLICT, ACCEPTED, ACCEPTED]);
}

#[actix_web::test]
async fn test_status_ignores_read_locks() {
    let statuses = run_scenario!([
        "rlock?key=blah",
        "status?key=blah",
        "runlock?key=blah",
        "status?key=blah"
    ]);
    assert_eq!(statuses, vec![ACCEPTED, OK, ACCEPTED, OK]);
}

#[actix_web::test]
async fn test_lock_blocks_rlock_until_unlock() {
    let statuses = run_scenario!([
        "lock?key=blah",
        "rlock?key=blah",
        "unlock?key=blah",
        "rlock?key=blah"
    ]);
    assert_eq!(statuses, vec![ACCEPTED, CONFLICT, ACCEPTED, ACCEPTED]);
}

#[actix_web::test]
async fn test_locked_status_blocks_relock() {
    let statuses = run_scenario!(["lock?key=blah", "status?key=blah", "lock?key=blah"]);
    assert_eq!(statuses, vec![ACCEPTED, LOCKED, CONFLICT]);
}

#[actix_web::test]
async fn test_unlock_without_lock() {
    let statuses = run_scenario!(["unlock?key=blah"]);
    assert_eq!(statuses, vec![CONFLICT]);
}

#[actix_web::test]
async fn test_status_tracks_lock_lifecycle() {
    let statuses = run_scenario!([
        "status?key=blah",
        "lock?key=blah",
        "status?key=blah",
        "unlock?key=blah",
        "status?key=blah"
    ]);
    assert_eq!(statuses, vec![OK, ACCEPTED, LOCKED, ACCEPTED, OK]);
}

#[actix_web::test]
async fn test_runlock_always_accepted() {
    let statuses = run_scenario!([
        "runlock?key=blah",
        "runlock?key=blah",
        "rlock?key=blah",
        "runlock?key=blah",
        "runlock?key=blah",
        "lock?key=blah"
    ]);
    assert_eq!(
        statuses,
        vec![ACCEPTED, ACCEPTED, ACCEPTED, ACCEPTED, ACCEPTED, ACCEPTED]
    );
}

#[actix_web::test]
async fn test_many_readers_then_writer() {
    let mut paths = vec!["rlock?key=shared"; 10];
    paths.push("lock?key=shared");
    paths.extend(vec!["runlock?key=shared"; 10]);
    paths.push("lock?key=shared");

    let statuses = run_scenario!(paths);
    assert!(statuses[..10].iter().all(|s| *s == ACCEPTED));
    assert_eq!(statuses[10], CONFLICT);
    assert!(statuses[11..21].iter().all(|s| *s == ACCEPTED));
    assert_eq!(statuses[21], ACCEPTED);
}

#[actix_web::test]
async fn test_keys_do_not_interfere() {
    let statuses = run_scenario!([
        "lock?key=a",
        "lock?key=b",
        "rlock?key=c",
        "status?key=a",
        "status?key=c"
    ]);
    assert_eq!(statuses, vec![ACCEPTED, ACCEPTED, ACCEPTED, LOCKED, OK]);
}

// ============================================================================
// Malformed requests
// ============================================================================

#[actix_web::test]
async fn test_missing_key_is_bad_request() {
    let statuses = run_scenario!([
        "lock",
        "rlock?key=",
        "unlock?other=blah",
        "runlock",
        "status?key="
    ]);
    assert!(statuses.iter().all(|s| *s == StatusCode::BAD_REQUEST));
}

#[actix_web::test]
async fn test_repeated_key_uses_first_value() {
    let registry = web::Data::new(LockRegistry::new());
    let app = lock_app!(registry);

    let req = test::TestRequest::get().uri("/lock?key=a&key=b").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), ACCEPTED);
    assert_eq!(registry.status("a"), mutex_core::LockStatus::Locked);
    assert_eq!(registry.status("b"), mutex_core::LockStatus::Free);

    for (uri, expected) in [
        ("/status?key=a&key=b", LOCKED),
        ("/runlock?key=b&key=a", ACCEPTED),
        ("/rlock?key=a&key=a", CONFLICT),
        ("/unlock?key=a&key=", ACCEPTED),
        ("/status?key=&key=a", StatusCode::BAD_REQUEST),
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected, "unexpected status on {}", uri);
        let body = test::read_body(resp).await;
        assert!(body.is_empty(), "unexpected body on {}", uri);
    }
}

#[actix_web::test]
async fn test_missing_key_does_not_touch_registry() {
    let registry = web::Data::new(LockRegistry::new());
    let app = lock_app!(registry);

    for uri in ["/lock", "/rlock?key=", "/unlock"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    assert_eq!(registry.stats().tracked_keys, 0);
}

// ============================================================================
// Transport behavior
// ============================================================================

#[actix_web::test]
async fn test_health() {
    let statuses = run_scenario!(["health"]);
    assert_eq!(statuses, vec![OK]);
}

#[actix_web::test]
async fn test_every_response_allows_any_origin() {
    let registry = web::Data::new(LockRegistry::new());
    let app = lock_app!(registry);

    for uri in [
        "/health",
        "/lock?key=x",
        "/lock?key=x",
        "/status?key=x",
        "/rlock",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let origin = resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok());
        assert_eq!(origin, Some("*"), "missing CORS header on {}", uri);
    }
}

#[actix_web::test]
async fn test_responses_have_empty_bodies() {
    let registry = web::Data::new(LockRegistry::new());
    let app = lock_app!(registry);

    for uri in ["/lock?key=x", "/lock?key=x", "/status?key=x", "/unlock"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert!(body.is_empty(), "unexpected body on {}", uri);
    }
}

#[actix_web::test]
async fn test_registry_state_shared_across_requests() {
    let registry = web::Data::new(LockRegistry::new());
    let app = lock_app!(registry);

    let req = test::TestRequest::get().uri("/lock?key=job").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), ACCEPTED);

    // The injected registry observes the HTTP-side mutation
    assert_eq!(registry.status("job"), mutex_core::LockStatus::Locked);

    // A release through the registry is visible over HTTP
    registry.release_write("job");
    let req = test::TestRequest::get().uri("/status?key=job").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), OK);
}

#[actix_web::test]
async fn test_bind_failure_is_reported() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port().to_string();

    let args = ServerArgs::parse_from([
        "mutex-server",
        "--config",
        "does/not/exist.yml",
        "--address",
        "127.0.0.1",
        "--port",
        port.as_str(),
    ]);
    let configuration = Configuration::load(&args).unwrap();

    let result = startup::lock_server(std::sync::Arc::new(LockRegistry::new()), &configuration);
    assert!(result.is_err());
}

// ============================================================================
// Concurrent requests across workers
// ============================================================================

const CONCURRENT_REQUESTS: usize = 32;

struct RunningServer {
    base_url: String,
    handle: ServerHandle,
    registry: Arc<LockRegistry>,
}

fn start_server() -> RunningServer {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
    writeln!(
        file,
        "server:\n  address: 127.0.0.1\n  port: {}\n  workers: 4\n  shutdown_timeout_secs: 1",
        port
    )
    .unwrap();
    let path = file.path().to_string_lossy().to_string();
    let configuration =
        Configuration::load(&ServerArgs::parse_from(["mutex-server", "-c", path.as_str()])).unwrap();
    assert_eq!(configuration.workers(), Some(4));

    let registry = Arc::new(LockRegistry::new());
    let server = startup::lock_server(registry.clone(), &configuration).unwrap();
    let handle = server.handle();
    actix_rt::spawn(server);

    RunningServer {
        base_url: format!("http://127.0.0.1:{}", port),
        handle,
        registry,
    }
}

/// Fire `n` simultaneous GETs at `path` and collect the status codes
async fn concurrent_statuses(base_url: &str, path: &str, n: usize) -> Vec<u16> {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..n {
        let request = client.get(format!("{}{}", base_url, path));
        tasks.spawn(async move { request.send().await.map(|resp| resp.status().as_u16()) });
    }

    let mut statuses = Vec::with_capacity(n);
    while let Some(result) = tasks.join_next().await {
        statuses.push(result.unwrap().unwrap());
    }
    statuses
}

fn count(statuses: &[u16], code: StatusCode) -> usize {
    statuses.iter().filter(|s| **s == code.as_u16()).count()
}

#[actix_web::test]
async fn test_concurrent_lock_has_single_winner() {
    let server = start_server();

    let statuses =
        concurrent_statuses(&server.base_url, "/lock?key=race", CONCURRENT_REQUESTS).await;
    assert_eq!(statuses.len(), CONCURRENT_REQUESTS);
    assert_eq!(count(&statuses, ACCEPTED), 1);
    assert_eq!(count(&statuses, CONFLICT), CONCURRENT_REQUESTS - 1);
    assert!(server.registry.state("race").writer_held);

    server.handle.stop(false).await;
}

#[actix_web::test]
async fn test_concurrent_rlock_all_granted() {
    let server = start_server();

    let statuses =
        concurrent_statuses(&server.base_url, "/rlock?key=shared", CONCURRENT_REQUESTS).await;
    assert_eq!(count(&statuses, ACCEPTED), CONCURRENT_REQUESTS);
    assert_eq!(
        server.registry.state("shared").reader_count,
        CONCURRENT_REQUESTS as u64
    );

    // Readers still hold the key, so every writer is refused
    let statuses =
        concurrent_statuses(&server.base_url, "/lock?key=shared", CONCURRENT_REQUESTS).await;
    assert_eq!(count(&statuses, CONFLICT), CONCURRENT_REQUESTS);

    let statuses =
        concurrent_statuses(&server.base_url, "/runlock?key=shared", CONCURRENT_REQUESTS).await;
    assert_eq!(count(&statuses, ACCEPTED), CONCURRENT_REQUESTS);
    assert!(server.registry.state("shared").is_idle());

    server.handle.stop(false).await;
}
