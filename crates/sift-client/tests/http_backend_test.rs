//! HTTP backend integration tests against a stubbed server.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sift_client::{ApiBackend, HttpBackend};
use sift_core::{translate, Error, IndexPhase, RiskLevel, ScanMode, SearchMode, SearchQuery};

async fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::with_base_url(server.uri()).unwrap()
}

#[tokio::test]
async fn status_is_parsed_and_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "scanning",
            "current": 12,
            "total": 40,
            "message": "Phase 2: Deep Forensic Analysis...",
            "current_file": "Analyzing: dump.sql",
            "mode": "DEEP"
        })))
        .mount(&server)
        .await;

    let status = backend_for(&server).await.status().await.unwrap();
    assert_eq!(status.phase, IndexPhase::Scanning);
    assert_eq!(status.current, 12);
    assert_eq!(status.mode, Some(ScanMode::Deep));
    assert!(!status.is_indeterminate());
}

#[tokio::test]
async fn search_sends_translated_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", r"\d+\.\d+\.\d+\.\d+"))
        .and(query_param("mode", "regex"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"filename": "access.log", "lineno": 7, "highlight": "<b>10.0.0.1</b>"}
        ])))
        .mount(&server)
        .await;

    let params = translate(&SearchQuery::new(
        r"\d+\.\d+\.\d+\.\d+",
        SearchMode::RegexAdvanced,
    ));
    let results = backend_for(&server).await.search(&params).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].snippet, "<b>10.0.0.1</b>");
    assert_eq!(results[0].lineno, Some(7));
}

#[tokio::test]
async fn backend_error_body_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("invalid regex: [unclosed"))
        .mount(&server)
        .await;

    let params = translate(&SearchQuery::new("[unclosed", SearchMode::RegexAdvanced));
    let err = backend_for(&server).await.search(&params).await.unwrap_err();
    match err {
        Error::Backend(msg) => assert!(msg.contains("invalid regex: [unclosed")),
        other => panic!("expected Backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn files_passes_server_side_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("risk_level", "HIGH"))
        .and(query_param("q", "dump"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{
                "id": 3,
                "filename": "dump.sql",
                "path": "/data/dump.sql",
                "type": ".sql",
                "true_type": "application/sql",
                "size": 1024,
                "has_text": 1,
                "created_at": "2024-01-15 10:30:00",
                "risk_level": "HIGH",
                "risk_score": 55.0,
                "details": "{\"detections\": {}}"
            }]
        })))
        .mount(&server)
        .await;

    let records = backend_for(&server)
        .await
        .files(Some(RiskLevel::High), Some("dump"))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.file_type, "application/sql");
    assert!(record.has_text);
    assert!(record.created_at.is_some());
    assert_eq!(record.risk_level, RiskLevel::High);
    assert!(record.details.is_object());
}

#[tokio::test]
async fn malformed_optional_fields_default_instead_of_failing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{
                "filename": "odd.bin",
                "created_at": "not a date",
                "risk_level": "IMPROBABLE",
                "details": "{broken json"
            }]
        })))
        .mount(&server)
        .await;

    let records = backend_for(&server).await.files(None, None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].created_at, None);
    assert_eq!(records[0].risk_level, RiskLevel::Unknown);
    assert_eq!(records[0].risk_score, 0.0);
    assert!(records[0].details.is_null());
}

#[tokio::test]
async fn load_returns_acknowledgement_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/load"))
        .and(query_param("mode", "FAST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Indexing started"})))
        .mount(&server)
        .await;

    let message = backend_for(&server)
        .await
        .start_indexing(ScanMode::Fast)
        .await
        .unwrap();
    assert_eq!(message, "Indexing started");
}

#[tokio::test]
async fn keyword_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/keywords"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 9, "keyword": "bitcoin"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/keywords/9"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let created = backend.add_keyword("bitcoin").await.unwrap();
    assert_eq!(created.id, 9);
    backend.delete_keyword(9).await.unwrap();
}

#[tokio::test]
async fn empty_keyword_rejected_client_side() {
    let server = MockServer::start().await;
    let err = backend_for(&server)
        .await
        .add_keyword("  ")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn unauthorized_login_maps_to_unauthorized_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .await
        .login("eve", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));
}
