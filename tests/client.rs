//
//  yacargo
//  tests/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use yacargo::api::claims::{
    Address, CargoItem, ClaimCreateRequest, ClaimDraft, ClaimEditRequest, ClaimSearchRequest, Contact,
    RoutePoint,
};
use yacargo::api::common::{CancelState, ClaimStatus, DocumentType, PointType};
use yacargo::api::reports::ReportRequest;
use yacargo::api::{ApiError, CargoClient};

const TOKEN: &str = "test-token";

fn client(server: &ServerGuard) -> CargoClient {
    CargoClient::new(TOKEN, true)
        .unwrap()
        .with_base_url(&server.url())
        .unwrap()
}

fn path(resource: &str) -> String {
    format!("/b2b/cargo/integration/{}", resource)
}

fn draft() -> ClaimDraft {
    let contact = Contact::new("Rick", "+79099999998");
    let points = vec![
        RoutePoint::new(
            1,
            1,
            PointType::Source,
            contact.clone(),
            Address::new("Moscow, Sadovnicheskaya 82", [37.64, 55.73]),
        ),
        RoutePoint::new(
            2,
            2,
            PointType::Destination,
            Contact::new("Morty", "+79099999999"),
            Address::new("Moscow, Tverskaya 1", [37.61, 55.75]),
        ),
    ];
    let items = vec![CargoItem::new(1, 2, "Documents", 100.0, "RUB", 1)];
    ClaimDraft::new(items, points, "Rick", "+79099999998")
}

#[tokio::test]
async fn test_claim_create_sends_request_id_and_nested_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", path("v2/claims/create").as_str())
        .match_query(Matcher::UrlEncoded("request_id".into(), "a1b2".into()))
        .match_header("authorization", "Bearer test-token")
        .match_header("accept-language", "ru")
        .match_body(Matcher::PartialJson(json!({
            "emergency_contact": {"name": "Rick", "phone": "+79099999998"},
            "route_points": [{"point_id": 1, "type": "source"}, {"point_id": 2, "type": "destination"}],
            "items": [{"pickup_point": 1, "droppof_point": 2, "title": "Documents", "quantity": 1}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "abc", "status": "new", "version": 1}"#)
        .create_async()
        .await;

    let claim = client(&server)
        .claim_create(&ClaimCreateRequest::new("a1b2", draft()))
        .await
        .unwrap();

    assert_eq!(claim.claim_id(), "abc");
    assert_eq!(claim.status, Some(ClaimStatus::New));
    assert_eq!(claim.version, Some(1));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_claim_edit_passes_version() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", path("v2/claims/edit").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("claim_id".into(), "abc".into()),
            Matcher::UrlEncoded("version".into(), "2".into()),
        ]))
        .with_status(409)
        .with_body(r#"{"code": "old_version", "message": "Version is outdated"}"#)
        .create_async()
        .await;

    let err = client(&server)
        .claim_edit(&ClaimEditRequest::new("abc", 2, draft()))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Api { status: 409, .. }));
    assert_eq!(err.code(), Some("old_version"));
    assert!(err.is_known_code());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_claim_info_not_found() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", path("v2/claims/info").as_str())
        .match_query(Matcher::UrlEncoded("claim_id".into(), "missing".into()))
        .with_status(404)
        .with_body(r#"{"code": "not_found", "message": "Claim not found"}"#)
        .create_async()
        .await;

    let err = client(&server).claim_info("missing").await.unwrap_err();
    match &err {
        ApiError::Api { status, code, message } => {
            assert_eq!(*status, 404);
            assert_eq!(code, "not_found");
            assert_eq!(message, "Claim not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_arguments_send_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let client = client(&server);

    let err = client
        .claim_cancel("abc", 1, &CancelState::Other("later".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Param(_)));

    let err = client.claim_info("").await.unwrap_err();
    assert!(err.to_string().contains("is a required parameter"));

    let err = client.search_active(0, 0).await.unwrap_err();
    assert!(matches!(err, ApiError::Param(_)));

    let err = client.claim_accept("abc", 0).await.unwrap_err();
    assert!(matches!(err, ApiError::Param(_)));

    let mut no_items = draft();
    no_items.items.clear();
    let err = client
        .claim_create(&ClaimCreateRequest::new("r1", no_items))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Param(_)));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_limit_boundaries() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", path("v2/claims/search").as_str())
        .match_body(Matcher::PartialJson(json!({"offset": 0, "limit": 1000})))
        .with_status(200)
        .with_body(r#"{"claims": []}"#)
        .expect(1)
        .create_async()
        .await;
    let client = client(&server);

    let result = client.claim_search(&ClaimSearchRequest::new(0, 1000)).await.unwrap();
    assert!(result.claims.is_empty());

    let err = client
        .claim_search(&ClaimSearchRequest::new(0, 1001))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Param(_)));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_accept_and_cancel_return_cut_claims() {
    let mut server = Server::new_async().await;
    let accept = server
        .mock("POST", path("v1/claims/accept").as_str())
        .match_query(Matcher::UrlEncoded("claim_id".into(), "abc".into()))
        .match_body(Matcher::Json(json!({"version": 1})))
        .with_status(200)
        .with_body(r#"{"id": "abc", "status": "accepted", "version": 1}"#)
        .create_async()
        .await;
    let cancel = server
        .mock("POST", path("v1/claims/cancel").as_str())
        .match_body(Matcher::Json(json!({"version": 1, "cancel_state": "free"})))
        .with_status(200)
        .with_body(r#"{"id": "abc", "status": "cancelled", "version": 2}"#)
        .create_async()
        .await;
    let client = client(&server);

    let accepted = client.claim_accept("abc", 1).await.unwrap();
    assert_eq!(accepted.status, Some(ClaimStatus::Accepted));

    let cancelled = client.claim_cancel("abc", 1, &CancelState::Free).await.unwrap();
    assert_eq!(cancelled.status, Some(ClaimStatus::Cancelled));
    assert_eq!(cancelled.version, Some(2));

    accept.assert_async().await;
    cancel.assert_async().await;
}

#[tokio::test]
async fn test_journal_reads_polling_delay() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", path("v1/claims/journal").as_str())
        .match_body(Matcher::Json(json!({"cursor": "c-1"})))
        .with_status(200)
        .with_header("X-Polling-Delay-Ms", "1500")
        .with_body(
            r#"{"cursor": "c-2", "events": [
                {"claim_id": "abc", "change_type": "status_changed", "updated_ts": "2020-01-01T00:00:00+00:00", "new_status": "performer_found"}
            ]}"#,
        )
        .create_async()
        .await;

    let journal = client(&server).claim_journal(Some("c-1")).await.unwrap();
    assert_eq!(journal.cursor.as_deref(), Some("c-2"));
    assert_eq!(journal.events.len(), 1);
    assert_eq!(journal.events[0].new_status, Some(ClaimStatus::PerformerFound));
    assert_eq!(journal.polling_delay(), Some(std::time::Duration::from_millis(1500)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_document_download_writes_file() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", path("v1/claims/document").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("claim_id".into(), "abc".into()),
            Matcher::UrlEncoded("document_type".into(), "act".into()),
            Matcher::UrlEncoded("version".into(), "1".into()),
            Matcher::UrlEncoded("status".into(), "delivered_finish".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body("%PDF-1.4 test")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("act.pdf");
    let file = client(&server)
        .claim_document("abc", &DocumentType::Act, 1, &ClaimStatus::DeliveredFinish, &destination)
        .await
        .unwrap();

    assert_eq!(file.bytes_written, 13);
    assert_eq!(file.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(std::fs::read_to_string(&destination).unwrap(), "%PDF-1.4 test");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_failed_download_leaves_no_file() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", path("v1/order-report/report").as_str())
        .match_query(Matcher::UrlEncoded("report_id".into(), "r-1".into()))
        .with_status(404)
        .with_body(r#"{"code": "not_found", "message": "No report"}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("report.csv");
    let err = client(&server).report_download("r-1", &destination).await.unwrap_err();

    assert_eq!(err.code(), Some("not_found"));
    assert!(!destination.exists());
}

#[tokio::test]
async fn test_report_generate_and_status() {
    let mut server = Server::new_async().await;
    let generate = server
        .mock("POST", path("v1/order-report/generate").as_str())
        .match_body(Matcher::PartialJson(json!({
            "since_date": "2024-01-01",
            "till_date": "2024-01-31",
            "idempotency_token": "tok"
        })))
        .with_status(200)
        .with_body(r#"{"task_id": "t-1"}"#)
        .create_async()
        .await;
    let status = server
        .mock("POST", path("v1/order-report/status").as_str())
        .match_body(Matcher::Json(json!({"task_id": "t-1"})))
        .with_status(200)
        .with_body(r#"{"task_id": "t-1", "status": "complete", "url": "https://example.com/report?report_id=r-7"}"#)
        .create_async()
        .await;
    let client = client(&server);

    let request = ReportRequest::new(
        chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        "tok",
    );
    let task = client.report_generate(&request).await.unwrap();
    assert_eq!(task.task_id, "t-1");

    let report = client.report_status(&task.task_id).await.unwrap();
    assert!(report.is_ready());
    assert_eq!(report.report_id().as_deref(), Some("r-7"));

    generate.assert_async().await;
    status.assert_async().await;
}

#[tokio::test]
async fn test_performer_endpoints() {
    let mut server = Server::new_async().await;
    let position = server
        .mock("GET", path("v1/claims/performer-position").as_str())
        .match_query(Matcher::UrlEncoded("claim_id".into(), "abc".into()))
        .with_status(200)
        .with_body(r#"{"position": {"lat": 55.7, "lon": 37.6, "timestamp": 1600000000}}"#)
        .create_async()
        .await;
    let phone = server
        .mock("POST", path("v1/driver-voiceforwarding").as_str())
        .match_body(Matcher::Json(json!({"claim_id": "abc"})))
        .with_status(200)
        .with_body(r#"{"phone": "+75555555555", "ext": "123", "ttl_seconds": 600}"#)
        .create_async()
        .await;
    let client = client(&server);

    let pos = client.performer_position("abc").await.unwrap();
    assert_eq!(pos.position_lat(), Some(55.7));
    let vf = client.voiceforwarding("abc").await.unwrap();
    assert_eq!(vf.ext.as_deref(), Some("123"));

    position.assert_async().await;
    phone.assert_async().await;
}

#[tokio::test]
async fn test_status_mapping() {
    let mut server = Server::new_async().await;
    let _forbidden = server
        .mock("POST", path("v2/claims/info").as_str())
        .match_query(Matcher::UrlEncoded("claim_id".into(), "forbidden".into()))
        .with_status(403)
        .with_body(r#"{"code": "no_access", "message": "Access denied"}"#)
        .create_async()
        .await;
    let _broken = server
        .mock("POST", path("v2/claims/info").as_str())
        .match_query(Matcher::UrlEncoded("claim_id".into(), "broken".into()))
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;
    let client = client(&server);

    let err = client.claim_info("forbidden").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { status: 403, .. }));

    let err = client.claim_info("broken").await.unwrap_err();
    match err {
        ApiError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let client = CargoClient::new(TOKEN, false)
        .unwrap()
        .with_base_url("http://127.0.0.1:9")
        .unwrap();
    let err = client.claim_info("abc").await.unwrap_err();
    assert!(err.is_network());
}

#[test]
fn test_empty_token_is_config_error() {
    assert!(matches!(CargoClient::new("", false), Err(ApiError::Config(_))));
}
