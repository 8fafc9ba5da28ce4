//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: parameter table → HTTP requests → page artifacts on disk

use flightstatus_collector::config::CollectorSettings;
use flightstatus_collector::http::HttpClientConfig;
use flightstatus_collector::loader::{load_credentials, load_parameter_sets};
use flightstatus_collector::pagination::StopReason;
use flightstatus_collector::{
    encode, run, AbortPolicy, ArtifactStore, Credential, Error, Filter, ParameterSet, RunConfig,
    SetOutcome,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_PATH: &str = "/opendata/flightstatus/";

fn http_config(server: &MockServer) -> HttpClientConfig {
    HttpClientConfig::builder()
        .base_url(format!("{}{API_PATH}", server.uri()))
        .no_rate_limit()
        .build()
}

fn run_config(
    server: &MockServer,
    dir: &Path,
    sets: Vec<ParameterSet>,
    keys: &[&str],
) -> RunConfig {
    RunConfig::new(sets, keys.iter().map(|k| Credential::new(*k)).collect())
        .with_output_dir(dir)
        .with_request_delay(Duration::ZERO)
        .with_http(http_config(server))
}

fn flights_page(page: u32, total_pages: u32) -> Value {
    json!({
        "operationalFlights": [
            {"flightNumber": 1000 + page, "airline": {"code": "KL"}}
        ],
        "page": {"pageNumber": page, "pageSize": 100, "totalPages": total_pages}
    })
}

fn ams() -> ParameterSet {
    ParameterSet::builtin_default().with(Filter::Origin, "AMS")
}

fn json_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".json"))
        .collect();
    names.sort();
    names
}

// ============================================================================
// Pagination Tests
// ============================================================================

#[tokio::test]
async fn test_page_cap_limits_artifacts() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();

    for page in 0..5 {
        Mock::given(method("GET"))
            .and(path(API_PATH))
            .and(query_param("origin", "AMS"))
            .and(query_param("pageNumber", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(flights_page(page, 5)))
            .expect(u64::from(page < 2))
            .mount(&mock_server)
            .await;
    }

    let config = run_config(&mock_server, dir.path(), vec![ams()], &["key-a"])
        .with_page_cap(Some(2));
    let report = run(&config).await.unwrap();

    let store = ArtifactStore::new(dir.path());
    let query = encode(&ams());
    assert!(store.artifact_path(&query, 0).exists());
    assert!(store.artifact_path(&query, 1).exists());
    assert!(!store.artifact_path(&query, 2).exists());
    assert_eq!(json_files(dir.path()).len(), 2);

    assert_eq!(
        report.sets[0].outcome,
        SetOutcome::Completed {
            reason: StopReason::PageCap
        }
    );
    assert_eq!(report.sets[0].total_pages, Some(5));
}

#[tokio::test]
async fn test_artifact_holds_response_body() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(flights_page(0, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    run(&run_config(&mock_server, dir.path(), vec![ams()], &["key-a"]))
        .await
        .unwrap();

    let path = ArtifactStore::new(dir.path()).artifact_path(&encode(&ams()), 0);
    let contents = std::fs::read_to_string(path).unwrap();
    assert!(contents.starts_with("{\n    \""));
    let body: Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(body, flights_page(0, 1));
}

#[tokio::test]
async fn test_builtin_set_sends_only_range() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("startRange", "2025-07-21T09:00:00Z"))
        .and(query_param("endRange", "2025-07-23T23:59:59Z"))
        .and(query_param("pageNumber", "0"))
        .and(header("API-Key", "key-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flights_page(0, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = run_config(
        &mock_server,
        dir.path(),
        vec![ParameterSet::builtin_default()],
        &["key-a"],
    );
    let report = run(&config).await.unwrap();
    assert_eq!(report.total_pages_written(), 1);

    let requests = mock_server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("origin"));
}

// ============================================================================
// Credential Rotation Tests
// ============================================================================

#[tokio::test]
async fn test_failed_key_rotates_to_next() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(header("API-Key", "key-a"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Developer Over Qps"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(header("API-Key", "key-b"))
        .and(query_param("pageNumber", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flights_page(0, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = run(&run_config(&mock_server, dir.path(), vec![ams()], &["key-a", "key-b"]))
        .await
        .unwrap();

    let set = &report.sets[0];
    assert_eq!(set.pages_written, vec![0]);
    assert_eq!(set.failures.len(), 1);
    assert!(set.failures[0].error.contains("403"));
    assert_eq!(json_files(dir.path()).len(), 1);
}

#[tokio::test]
async fn test_exhausted_keys_skip_to_next_set() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(query_param("origin", "AMS"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("origin", "CDG"))
        .and(header("API-Key", "key-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flights_page(0, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cdg = ParameterSet::builtin_default().with(Filter::Origin, "CDG");
    let report = run(&run_config(&mock_server, dir.path(), vec![ams(), cdg], &["key-a", "key-b"]))
        .await
        .unwrap();

    assert!(matches!(
        report.sets[0].exhaustion_error(),
        Some(Error::CredentialsExhausted { page: 0, credentials: 2, .. })
    ));
    assert_eq!(report.sets[1].pages_written, vec![0]);
    assert!(!report.stopped_early);
}

#[tokio::test]
async fn test_exhausted_keys_abort_run() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cdg = ParameterSet::builtin_default().with(Filter::Origin, "CDG");
    let config = run_config(&mock_server, dir.path(), vec![ams(), cdg], &["key-a"])
        .with_abort_policy(AbortPolicy::AbortRun);
    let report = run(&config).await.unwrap();

    assert!(report.stopped_early);
    assert_eq!(report.not_attempted, 1);
    assert!(json_files(dir.path()).is_empty());
}

// ============================================================================
// Resume Tests
// ============================================================================

#[tokio::test]
async fn test_rerun_sends_no_requests() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();

    for page in 0..2 {
        Mock::given(method("GET"))
            .and(query_param("pageNumber", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(flights_page(page, 2)))
            .mount(&mock_server)
            .await;
    }

    let config = run_config(&mock_server, dir.path(), vec![ams()], &["key-a"]);
    run(&config).await.unwrap();
    let first = json_files(dir.path());
    assert_eq!(first.len(), 2);

    mock_server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flights_page(0, 2)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = run(&config).await.unwrap();
    assert_eq!(report.total_requests(), 0);
    assert_eq!(json_files(dir.path()), first);
}

#[tokio::test]
async fn test_interrupted_run_resumes_at_gap() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let store = ArtifactStore::new(dir.path());
    let query = encode(&ams());
    store.write_page(&query, 0, &flights_page(0, 3)).await.unwrap();

    Mock::given(method("GET"))
        .and(query_param("pageNumber", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flights_page(0, 3)))
        .expect(0)
        .mount(&mock_server)
        .await;
    for page in 1..3 {
        Mock::given(method("GET"))
            .and(query_param("pageNumber", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(flights_page(page, 3)))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let report = run(&run_config(&mock_server, dir.path(), vec![ams()], &["key-a"]))
        .await
        .unwrap();

    assert_eq!(report.sets[0].resume_point, 1);
    assert_eq!(report.sets[0].pages_written, vec![1, 2]);
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
async fn test_reversed_range_sends_nothing() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flights_page(0, 1)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let reversed = ParameterSet::new()
        .with(Filter::StartRange, "2025-07-23T23:59:59Z")
        .with(Filter::EndRange, "2025-07-21T09:00:00Z");
    let result = run(&run_config(&mock_server, dir.path(), vec![reversed], &["key-a"])).await;

    assert!(matches!(result, Err(Error::InvalidRange { .. })));
    assert!(json_files(dir.path()).is_empty());
}

// ============================================================================
// Loader Tests
// ============================================================================

#[tokio::test]
async fn test_files_to_artifacts() {
    let mock_server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let out = dir.path().join("data");

    let params = dir.path().join("params.csv");
    std::fs::write(
        &params,
        "origin,carrierCode,startRange,endRange\nAMS,\"KL, AF\",2025-07-21T09:00:00Z,2025-07-23T23:59:59Z\n",
    )
    .unwrap();
    let keys = dir.path().join("keys.txt");
    std::fs::write(&keys, "# keys\nkey-a\n").unwrap();

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("carrierCode", "KL,AF"))
        .and(header("API-Key", "key-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flights_page(0, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let yaml = format!(
        "base_url: {}{API_PATH}\noutput_dir: {}\nrequest_delay_ms: 0\nrequests_per_second: null\n",
        mock_server.uri(),
        out.display()
    );
    let settings = CollectorSettings::from_yaml_str(&yaml).unwrap();
    let config = settings.into_run_config(
        load_parameter_sets(Some(params.as_path())).unwrap(),
        load_credentials(&keys).unwrap(),
    );

    let report = run(&config).await.unwrap();

    assert_eq!(report.total_pages_written(), 1);
    let names = json_files(&out);
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("afklm_api_data_collection_"));
    assert!(names[0].contains("carrierCode=KL,AF"));
    assert!(names[0].ends_with("_0.json"));
}
