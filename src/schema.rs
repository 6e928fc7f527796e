//! Wire representations of the API's JSON bodies.
//!
//! Missing and `null` fields fall back to their defaults; the domain types in
//! [`crate::zone`], [`crate::record`] and [`crate::primary_server`] are built
//! from these.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ApiTime;

/// Reads `null` as the default value, the way empty lists and unset fields
/// come back from the API.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MetaResponse {
    pub meta: Option<Meta>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Meta {
    pub pagination: Option<MetaPagination>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MetaPagination {
    #[serde(deserialize_with = "null_as_default")]
    pub last_page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub per_page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub total_entries: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Zone {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub created: ApiTime,
    pub modified: ApiTime,
    #[serde(deserialize_with = "null_as_default")]
    pub legacy_dns_host: String,
    #[serde(deserialize_with = "null_as_default")]
    pub legacy_ns: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ns: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(deserialize_with = "null_as_default")]
    pub paused: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub permission: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project: String,
    #[serde(deserialize_with = "null_as_default")]
    pub registrar: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ttl: u32,
    pub verified: ApiTime,
    #[serde(deserialize_with = "null_as_default")]
    pub records_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub is_secondary_dns: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub txt_verification: TxtVerification,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TxtVerification {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ZoneListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub zones: Vec<Zone>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ZoneResponse {
    pub zone: Zone,
}

#[derive(Debug, Serialize)]
pub(crate) struct ZoneRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ValidateZoneFileResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub passed_records: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub valid_records: Vec<Record>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Record {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub type_: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub created: ApiTime,
    pub modified: ApiTime,
    #[serde(deserialize_with = "null_as_default")]
    pub zone_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    pub ttl: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordResponse {
    pub record: Record,
}

/// A record as sent in create and update requests, and as echoed back in
/// bulk responses.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RecordBulkEntry {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub type_: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zone_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecordBulkRequest {
    pub records: Vec<RecordBulkEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RecordBulkCreateResponse {
    // Singular key for a list of records, exactly as the API sends it.
    #[serde(rename = "record", deserialize_with = "null_as_default")]
    pub records: Vec<Record>,
    #[serde(deserialize_with = "null_as_default")]
    pub valid_records: Vec<RecordBulkEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub invalid_records: Vec<RecordBulkEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RecordBulkUpdateResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub records: Vec<Record>,
    #[serde(deserialize_with = "null_as_default")]
    pub failed_records: Vec<RecordBulkEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PrimaryServer {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub port: u16,
    pub created: ApiTime,
    pub modified: ApiTime,
    #[serde(deserialize_with = "null_as_default")]
    pub zone_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrimaryServerListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary_servers: Vec<PrimaryServer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrimaryServerResponse {
    pub primary_server: PrimaryServer,
}

#[derive(Debug, Serialize)]
pub(crate) struct PrimaryServerRequest<'a> {
    pub address: &'a str,
    pub port: u16,
    pub zone_id: &'a str,
}
