//! DNS records.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::zone::ZoneRef;
use crate::{
    ApiTime, Client, ClientError, ListOpts, RequestBody, Response, ValidationError, resource_path,
    schema,
};

const PATH_RECORDS: &str = "/records";

/// Possible types a DNS record can have.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Type {
    A,
    Aaaa,
    Ptr,
    Ns,
    Mx,
    Cname,
    Rp,
    Txt,
    Soa,
    Hinfo,
    Srv,
    Dane,
    Tlsa,
    Ds,
    Caa,
}

impl Type {
    /// Gets the string representation of the type.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// A DNS record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub type_: Type,
    pub name: String,
    pub value: String,
    /// `None` means the zone's default TTL applies.
    pub ttl: Option<u32>,
    pub zone: ZoneRef,
    pub created: ApiTime,
    pub modified: ApiTime,
}

impl TryFrom<schema::Record> for Record {
    type Error = ClientError;

    fn try_from(value: schema::Record) -> Result<Self, Self::Error> {
        let type_ = value
            .type_
            .parse()
            .map_err(|_| ClientError::UnknownRecordType(value.type_.clone()))?;

        Ok(Self {
            id: value.id,
            type_,
            name: value.name,
            value: value.value,
            ttl: value.ttl,
            zone: value.zone_id.into(),
            created: value.created,
            modified: value.modified,
        })
    }
}

fn records_from_schema(records: Vec<schema::Record>) -> Result<Vec<Record>, ClientError> {
    records.into_iter().map(Record::try_from).collect()
}

/// A record as echoed back by a bulk operation.
///
/// These entries may have been rejected by the API, so they carry no id and
/// an unrecognised type is kept as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    pub type_: Option<Type>,
    pub zone_id: String,
    pub name: String,
    pub value: String,
    pub ttl: Option<u32>,
}

impl From<schema::RecordBulkEntry> for RecordEntry {
    fn from(value: schema::RecordBulkEntry) -> Self {
        Self {
            type_: value.type_.parse().ok(),
            zone_id: value.zone_id,
            name: value.name,
            value: value.value,
            ttl: value.ttl,
        }
    }
}

/// Options for listing records.
#[derive(Debug, Clone, Default)]
pub struct RecordListOpts {
    pub list: ListOpts,
    pub zone_id: String,
}

impl RecordListOpts {
    fn path(&self) -> String {
        self.list
            .query()
            .add_if_not_empty("zone_id", &self.zone_id)
            .to_path(PATH_RECORDS)
    }
}

fn validate_record(
    name: &str,
    type_: Option<Type>,
    value: &str,
    zone: Option<&ZoneRef>,
) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if type_.is_none() {
        return Err(ValidationError::TypeRequired);
    }
    if value.is_empty() {
        return Err(ValidationError::ValueRequired);
    }
    if zone.is_none_or(|z| z.id.is_empty()) {
        return Err(ValidationError::ZoneRequired);
    }
    Ok(())
}

/// Builds the wire entry for already validated options.
fn entry(
    id: &str,
    name: &str,
    type_: Option<Type>,
    value: &str,
    ttl: Option<u32>,
    zone: Option<&ZoneRef>,
) -> schema::RecordBulkEntry {
    schema::RecordBulkEntry {
        id: id.to_string(),
        name: name.to_string(),
        ttl,
        type_: type_.map(|t| t.as_str()).unwrap_or_default().to_string(),
        value: value.to_string(),
        zone_id: zone.map(|z| z.id.clone()).unwrap_or_default(),
    }
}

/// Options for creating a record.
#[derive(Debug, Clone, Default)]
pub struct RecordCreateOpts {
    pub name: String,
    pub ttl: Option<u32>,
    pub type_: Option<Type>,
    pub value: String,
    /// Zone the record belongs to. Only its id is sent.
    pub zone: Option<ZoneRef>,
}

impl RecordCreateOpts {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_record(&self.name, self.type_, &self.value, self.zone.as_ref())
    }

    fn to_schema(&self) -> schema::RecordBulkEntry {
        entry(
            "",
            &self.name,
            self.type_,
            &self.value,
            self.ttl,
            self.zone.as_ref(),
        )
    }
}

/// Options for updating a record.
#[derive(Debug, Clone, Default)]
pub struct RecordUpdateOpts {
    pub name: String,
    pub ttl: Option<u32>,
    pub type_: Option<Type>,
    pub value: String,
    pub zone: Option<ZoneRef>,
}

impl RecordUpdateOpts {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_record(&self.name, self.type_, &self.value, self.zone.as_ref())
    }

    fn to_schema(&self) -> schema::RecordBulkEntry {
        entry(
            "",
            &self.name,
            self.type_,
            &self.value,
            self.ttl,
            self.zone.as_ref(),
        )
    }
}

/// Options for one entry of a bulk update.
#[derive(Debug, Clone, Default)]
pub struct RecordBulkUpdateOpts {
    /// Id of the record to update.
    pub id: String,
    pub name: String,
    pub ttl: Option<u32>,
    pub type_: Option<Type>,
    pub value: String,
    pub zone: Option<ZoneRef>,
}

impl RecordBulkUpdateOpts {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::IdRequired);
        }
        validate_record(&self.name, self.type_, &self.value, self.zone.as_ref())
    }

    fn to_schema(&self) -> schema::RecordBulkEntry {
        entry(
            &self.id,
            &self.name,
            self.type_,
            &self.value,
            self.ttl,
            self.zone.as_ref(),
        )
    }
}

/// Outcome of [RecordClient::bulk_create].
///
/// The groups are not in the order of the submitted entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBulkCreateResponse {
    /// Records that were created.
    pub records: Vec<Record>,
    pub valid_records: Vec<RecordEntry>,
    pub invalid_records: Vec<RecordEntry>,
}

impl TryFrom<schema::RecordBulkCreateResponse> for RecordBulkCreateResponse {
    type Error = ClientError;

    fn try_from(value: schema::RecordBulkCreateResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            records: records_from_schema(value.records)?,
            valid_records: value.valid_records.into_iter().map(Into::into).collect(),
            invalid_records: value.invalid_records.into_iter().map(Into::into).collect(),
        })
    }
}

/// Outcome of [RecordClient::bulk_update].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBulkUpdateResponse {
    /// Records that were updated.
    pub records: Vec<Record>,
    pub failed_records: Vec<RecordEntry>,
}

impl TryFrom<schema::RecordBulkUpdateResponse> for RecordBulkUpdateResponse {
    type Error = ClientError;

    fn try_from(value: schema::RecordBulkUpdateResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            records: records_from_schema(value.records)?,
            failed_records: value.failed_records.into_iter().map(Into::into).collect(),
        })
    }
}

/// Client for the records API, obtained from [Client::record].
#[derive(Clone, Copy)]
pub struct RecordClient<'a> {
    client: &'a Client,
}

impl<'a> RecordClient<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the records matching `opts`.
    pub fn list(&self, opts: &RecordListOpts) -> Result<(Vec<Record>, Response), ClientError> {
        let req = self.client.new_request(Method::GET, &opts.path(), None)?;
        let (body, resp) = self
            .client
            .execute_json::<schema::RecordListResponse>(req)?;

        Ok((records_from_schema(body.records)?, resp))
    }

    /// Retrieves the record with the given id.
    pub fn get_by_id(&self, id: &str) -> Result<(Record, Response), ClientError> {
        let req = self
            .client
            .new_request(Method::GET, &resource_path(PATH_RECORDS, id)?, None)?;
        let (body, resp) = self.client.execute_json::<schema::RecordResponse>(req)?;

        Ok((body.record.try_into()?, resp))
    }

    /// Creates a record.
    ///
    /// # Errors
    ///
    /// Will return a `Validation` error without sending anything if the name,
    /// type, value or zone is missing.
    pub fn create(&self, opts: &RecordCreateOpts) -> Result<(Record, Response), ClientError> {
        opts.validate()?;

        let body = RequestBody::json(&opts.to_schema())?;
        let req = self
            .client
            .new_request(Method::POST, PATH_RECORDS, Some(body))?;
        let (body, resp) = self.client.execute_json::<schema::RecordResponse>(req)?;

        Ok((body.record.try_into()?, resp))
    }

    /// Updates the record with the given id.
    pub fn update(
        &self,
        id: &str,
        opts: &RecordUpdateOpts,
    ) -> Result<(Record, Response), ClientError> {
        opts.validate()?;

        let body = RequestBody::json(&opts.to_schema())?;
        let req = self.client.new_request(
            Method::PUT,
            &resource_path(PATH_RECORDS, id)?,
            Some(body),
        )?;
        let (body, resp) = self.client.execute_json::<schema::RecordResponse>(req)?;

        Ok((body.record.try_into()?, resp))
    }

    /// Deletes the record.
    pub fn delete(&self, id: &str) -> Result<Response, ClientError> {
        let req = self
            .client
            .new_request(Method::DELETE, &resource_path(PATH_RECORDS, id)?, None)?;

        self.client.execute(req)
    }

    /// Creates several records in one request.
    ///
    /// # Errors
    ///
    /// Every entry is validated first. If any is invalid, nothing is sent and
    /// the first failure is returned.
    pub fn bulk_create(
        &self,
        opts: &[RecordCreateOpts],
    ) -> Result<(RecordBulkCreateResponse, Response), ClientError> {
        for o in opts {
            o.validate()?;
        }

        let body = RequestBody::json(&schema::RecordBulkRequest {
            records: opts.iter().map(RecordCreateOpts::to_schema).collect(),
        })?;
        let req = self.client.new_request(
            Method::POST,
            &format!("{PATH_RECORDS}/bulk"),
            Some(body),
        )?;
        let (body, resp) = self
            .client
            .execute_json::<schema::RecordBulkCreateResponse>(req)?;

        Ok((body.try_into()?, resp))
    }

    /// Updates several records, addressed by id, in one request.
    ///
    /// # Errors
    ///
    /// Every entry is validated first. If any is invalid, nothing is sent and
    /// the first failure is returned.
    pub fn bulk_update(
        &self,
        opts: &[RecordBulkUpdateOpts],
    ) -> Result<(RecordBulkUpdateResponse, Response), ClientError> {
        for o in opts {
            o.validate()?;
        }

        let body = RequestBody::json(&schema::RecordBulkRequest {
            records: opts.iter().map(RecordBulkUpdateOpts::to_schema).collect(),
        })?;
        let req = self.client.new_request(
            Method::PUT,
            &format!("{PATH_RECORDS}/bulk"),
            Some(body),
        )?;
        let (body, resp) = self
            .client
            .execute_json::<schema::RecordBulkUpdateResponse>(req)?;

        Ok((body.try_into()?, resp))
    }
}
