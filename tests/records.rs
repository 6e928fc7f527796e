mod common;

use common::TestEnv;
use hdns::record::{RecordBulkUpdateOpts, RecordCreateOpts, RecordListOpts, RecordUpdateOpts, Type};
use hdns::zone::ZoneRef;
use hdns::{ClientError, ValidationError};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

fn record_json(id: &str, type_: &str, name: &str, zone_id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "type": type_,
        "name": name,
        "value": "127.0.0.1",
        "zone_id": zone_id,
        "created": "2022-12-13 01:37:45.814 +0000 UTC",
        "modified": "2022-12-13T01:37:45Z"
    })
}

fn create_opts(name: &str) -> RecordCreateOpts {
    RecordCreateOpts {
        name: name.to_string(),
        ttl: None,
        type_: Some(Type::A),
        value: "127.0.0.1".to_string(),
        zone: Some(ZoneRef::from("1")),
    }
}

fn update_opts(id: &str, name: &str) -> RecordBulkUpdateOpts {
    RecordBulkUpdateOpts {
        id: id.to_string(),
        name: name.to_string(),
        ttl: Some(60),
        type_: Some(Type::A),
        value: "127.0.0.2".to_string(),
        zone: Some(ZoneRef::from("1")),
    }
}

#[test]
fn list() {
    let env = TestEnv::new();
    env.mount(
        Mock::given(method("GET"))
            .and(path("/records"))
            .and(query_param_is_missing("zone_id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [
                    record_json("1", "A", "www", "1"),
                    record_json("2", "AAAA", "www", "2"),
                    record_json("3", "MX", "@", "2"),
                ]
            }))),
    );
    env.mount(
        Mock::given(method("GET"))
            .and(path("/records"))
            .and(query_param("zone_id", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [record_json("1", "A", "www", "1")]
            }))),
    );
    env.mount(
        Mock::given(method("GET"))
            .and(path("/records"))
            .and(query_param("zone_id", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []}))),
    );

    let mut opts = RecordListOpts::default();
    let (records, _) = env.client.record().list(&opts).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].type_, Type::Aaaa);
    assert_eq!(records[2].zone.id, "2");

    opts.zone_id = "1".to_string();
    let (records, _) = env.client.record().list(&opts).unwrap();
    assert_eq!(records.len(), 1);

    opts.zone_id = "3".to_string();
    let (records, resp) = env.client.record().list(&opts).unwrap();
    assert!(records.is_empty());
    assert_eq!(resp.pagination(), None);
}

#[test]
fn get_by_id() {
    let env = TestEnv::new();
    env.mount(
        Mock::given(method("GET"))
            .and(path("/records/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "record": record_json("1", "TXT", "_acme", "9")
            }))),
    );
    env.mount(
        Mock::given(method("GET"))
            .and(path("/records/0"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({}))),
    );

    let (record, _) = env.client.record().get_by_id("1").unwrap();
    assert_eq!(record.id, "1");
    assert_eq!(record.type_, Type::Txt);
    assert_eq!(record.zone, ZoneRef::from("9"));
    assert_eq!(record.created.to_string(), "2022-12-13T01:37:45.814Z");
    assert_eq!(record.modified.to_string(), "2022-12-13T01:37:45Z");

    let err = env.client.record().get_by_id("0").unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[test]
fn unknown_type_in_response() {
    let env = TestEnv::new();
    env.mount(
        Mock::given(method("GET"))
            .and(path("/records/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "record": record_json("1", "LOC", "www", "1")
            }))),
    );

    let err = env.client.record().get_by_id("1").unwrap_err();
    assert!(matches!(err, ClientError::UnknownRecordType(t) if t == "LOC"));
}

#[test]
fn create() {
    let env = TestEnv::new();
    env.mount(
        Mock::given(method("POST"))
            .and(path("/records"))
            .and(body_json(json!({
                "name": "www",
                "type": "A",
                "value": "127.0.0.1",
                "zone_id": "1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "record": record_json("5", "A", "www", "1")
            }))),
    );

    let (record, _) = env.client.record().create(&create_opts("www")).unwrap();
    assert_eq!(record.id, "5");
    assert_eq!(record.ttl, None);
}

#[test]
fn create_invalid_sends_nothing() {
    let env = TestEnv::new();

    let err = env
        .client
        .record()
        .create(&create_opts(""))
        .unwrap_err();
    assert_eq!(err.to_string(), "name required");

    let opts = RecordCreateOpts {
        zone: None,
        ..create_opts("www")
    };
    let err = env.client.record().create(&opts).unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::ZoneRequired)
    ));

    let opts = RecordUpdateOpts {
        name: "www".to_string(),
        value: "127.0.0.1".to_string(),
        zone: Some(ZoneRef::from("1")),
        ..Default::default()
    };
    let err = env.client.record().update("1", &opts).unwrap_err();
    assert_eq!(err.to_string(), "type required");

    assert!(env.requests().is_empty());
}

#[test]
fn update() {
    let env = TestEnv::new();
    env.mount(
        Mock::given(method("PUT"))
            .and(path("/records/5"))
            .and(body_json(json!({
                "name": "www",
                "ttl": 300,
                "type": "CNAME",
                "value": "example.org.",
                "zone_id": "1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "record": {
                    "id": "5",
                    "type": "CNAME",
                    "name": "www",
                    "value": "example.org.",
                    "ttl": 300,
                    "zone_id": "1"
                }
            }))),
    );

    let opts = RecordUpdateOpts {
        name: "www".to_string(),
        ttl: Some(300),
        type_: Some(Type::Cname),
        value: "example.org.".to_string(),
        zone: Some(ZoneRef::from("1")),
    };
    let (record, _) = env.client.record().update("5", &opts).unwrap();
    assert_eq!(record.type_, Type::Cname);
    assert_eq!(record.ttl, Some(300));
    assert!(record.created.is_zero());
}

#[test]
fn delete() {
    let env = TestEnv::new();
    env.mount(
        Mock::given(method("DELETE"))
            .and(path("/records/5"))
            .respond_with(ResponseTemplate::new(200)),
    );

    env.client.record().delete("5").unwrap();
    assert_eq!(env.requests().len(), 1);
}

#[test]
fn bulk_create() {
    let env = TestEnv::new();
    env.mount(
        Mock::given(method("POST"))
            .and(path("/records/bulk"))
            .and(body_json(json!({
                "records": [
                    {"name": "a", "type": "A", "value": "127.0.0.1", "zone_id": "1"},
                    {"name": "b", "type": "A", "value": "127.0.0.1", "zone_id": "1"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "record": [record_json("10", "A", "b", "1")],
                "valid_records": [
                    {"type": "A", "name": "b", "value": "127.0.0.1", "zone_id": "1"}
                ],
                "invalid_records": [
                    {"type": "A", "name": "a", "value": "127.0.0.1", "zone_id": "1", "ttl": 0}
                ]
            }))),
    );

    let opts = [create_opts("a"), create_opts("b")];
    let (result, _) = env.client.record().bulk_create(&opts).unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].name, "b");
    assert_eq!(result.valid_records.len(), 1);
    assert_eq!(result.valid_records[0].type_, Some(Type::A));
    assert_eq!(result.invalid_records.len(), 1);
    assert_eq!(result.invalid_records[0].name, "a");
    assert_eq!(result.invalid_records[0].ttl, Some(0));
}

#[test]
fn bulk_create_invalid_entry_sends_nothing() {
    let env = TestEnv::new();

    let opts = [create_opts("a"), create_opts(""), create_opts("c")];
    let err = env.client.record().bulk_create(&opts).unwrap_err();
    assert_eq!(err.to_string(), "name required");

    assert!(env.requests().is_empty());
}

#[test]
fn bulk_update() {
    let env = TestEnv::new();
    env.mount(
        Mock::given(method("PUT"))
            .and(path("/records/bulk"))
            .and(body_json(json!({
                "records": [
                    {"id": "1", "name": "a", "ttl": 60, "type": "A", "value": "127.0.0.2", "zone_id": "1"},
                    {"id": "2", "name": "b", "ttl": 60, "type": "A", "value": "127.0.0.2", "zone_id": "1"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [record_json("1", "A", "a", "1")],
                "failed_records": [
                    {"type": "A", "name": "b", "value": "127.0.0.2", "zone_id": "1", "ttl": 60}
                ]
            }))),
    );

    let opts = [update_opts("1", "a"), update_opts("2", "b")];
    let (result, _) = env.client.record().bulk_update(&opts).unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].id, "1");
    assert_eq!(result.failed_records.len(), 1);
    assert_eq!(result.failed_records[0].name, "b");
    assert_eq!(result.failed_records[0].zone_id, "1");
}

#[test]
fn bulk_update_missing_id_sends_nothing() {
    let env = TestEnv::new();

    let opts = [update_opts("1", "a"), update_opts("", "b"), update_opts("3", "c")];
    let err = env.client.record().bulk_update(&opts).unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::IdRequired)
    ));
    assert_eq!(err.to_string(), "id required");

    assert!(env.requests().is_empty());
}

#[test]
fn null_collections_are_empty() {
    let env = TestEnv::new();
    env.mount(
        Mock::given(method("GET"))
            .and(path("/records"))
            .and(query_param("zone_id", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": null}))),
    );
    env.mount(
        Mock::given(method("PUT"))
            .and(path("/records/bulk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [record_json("1", "A", "a", "1")],
                "failed_records": null
            }))),
    );

    let opts = RecordListOpts {
        zone_id: "4".to_string(),
        ..Default::default()
    };
    let (records, _) = env.client.record().list(&opts).unwrap();
    assert!(records.is_empty());

    let (result, _) = env
        .client
        .record()
        .bulk_update(&[update_opts("1", "a")])
        .unwrap();
    assert_eq!(result.records.len(), 1);
    assert!(result.failed_records.is_empty());
}
