use httpmock::prelude::*;
use mingpian_core::{PersonRecord, StoreConfig};
use mingpian_store::{AirtableStore, BatchWriter, Credentials, RecordStore, StoreError};
use pretty_assertions::assert_eq;
use serde_json::json;

fn store_for(server: &MockServer) -> AirtableStore {
    let config = StoreConfig {
        api_url: server.url("/v0"),
        table_name: "Cards".to_string(),
        ..Default::default()
    };
    let credentials = Credentials::new("pat-test", "appTEST").unwrap();
    AirtableStore::new(credentials, &config).unwrap()
}

fn people(n: usize) -> Vec<PersonRecord> {
    (0..n)
        .map(|i| PersonRecord {
            company: "ACME".to_string(),
            name: format!("員工{}", i),
            ..Default::default()
        })
        .collect()
}

#[tokio::test]
async fn create_sends_labeled_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v0/appTEST/Cards")
                .header("authorization", "Bearer pat-test")
                .json_body(json!({
                    "records": [{
                        "fields": {
                            "公司名稱": "ACME",
                            "地址": "",
                            "統一編號": "",
                            "公司電話": "",
                            "傳真": "",
                            "職稱": "經理",
                            "姓名": "王小明",
                            "手機": "0912345678",
                            "Email": ""
                        }
                    }]
                }));
            then.status(200)
                .json_body(json!({ "records": [{ "id": "rec1", "fields": {} }] }));
        })
        .await;

    let record = PersonRecord {
        company: "ACME".to_string(),
        title: "經理".to_string(),
        name: "王小明".to_string(),
        mobile: "0912345678".to_string(),
        ..Default::default()
    };
    let written = store_for(&server).create_records(&[record]).await.unwrap();

    assert_eq!(written, 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn batch_writer_issues_one_request_per_group() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v0/appTEST/Cards");
            then.status(200).json_body(json!({ "records": [] }));
        })
        .await;

    let writer = BatchWriter::new(store_for(&server), 10).unwrap();
    let summary = writer.write(&people(23)).await.unwrap();

    assert_eq!(summary.records_written, 23);
    assert_eq!(summary.batches, 3);
    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn api_error_surfaces_status_and_message() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v0/appTEST/Cards");
            then.status(422).json_body(json!({
                "error": {
                    "type": "INVALID_VALUE_FOR_COLUMN",
                    "message": "Field \"手機\" cannot accept the provided value"
                }
            }));
        })
        .await;

    let writer = BatchWriter::new(store_for(&server), 10).unwrap();
    let err = writer.write(&people(23)).await.unwrap_err();

    match err {
        StoreError::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Field \"手機\" cannot accept the provided value");
        }
        other => panic!("unexpected error: {other}"),
    }
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn plain_error_string_is_used() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v0/appTEST/Cards");
            then.status(401)
                .json_body(json!({ "error": "AUTHENTICATION_REQUIRED" }));
        })
        .await;

    let err = store_for(&server)
        .create_records(&people(1))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Airtable API HTTP 401: AUTHENTICATION_REQUIRED"
    );
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let config = StoreConfig {
        api_url: "http://127.0.0.1:1/v0".to_string(),
        request_timeout_secs: 5,
        ..Default::default()
    };
    let credentials = Credentials::new("pat-test", "appTEST").unwrap();
    let store = AirtableStore::new(credentials, &config).unwrap();

    let err = store.create_records(&people(1)).await.unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)), "got {err}");
}

#[tokio::test]
async fn search_filters_on_company_and_name() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v0/appTEST/Cards")
                .header("authorization", "Bearer pat-test")
                .query_param("pageSize", "100")
                .query_param(
                    "filterByFormula",
                    r#"OR(SEARCH("ACME",{公司名稱})>0,SEARCH("ACME",{姓名})>0)"#,
                );
            then.status(200).json_body(json!({
                "records": [
                    {
                        "id": "rec1",
                        "createdTime": "2024-05-01T08:00:00.000Z",
                        "fields": { "公司名稱": "ACME", "姓名": "王小明", "手機": "0912345678" }
                    },
                    {
                        "id": "rec2",
                        "createdTime": "2024-05-01T08:00:00.000Z",
                        "fields": { "公司名稱": "ACME", "姓名": "陳大文", "統一編號": 12345678 }
                    }
                ]
            }));
        })
        .await;

    let found = store_for(&server).search("ACME").await.unwrap();

    mock.assert_async().await;
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].id, "rec1");
    assert_eq!(found[0].record.mobile, "0912345678");
    assert_eq!(found[1].record.name, "陳大文");
    assert_eq!(found[1].record.tax_id, "");
}

#[tokio::test]
async fn empty_search_term_is_rejected() {
    let server = MockServer::start_async().await;
    let err = store_for(&server).search("   ").await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidQuery(_)));
}
