//! DNS zones.

use std::io::{Cursor, Read};

use reqwest::Method;
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::record::Record;
use crate::{
    ApiTime, Client, ClientError, ListOpts, RequestBody, Response, ValidationError, resource_path,
    schema,
};

const PATH_ZONES: &str = "/zones";

/// Verification state of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ZoneStatus {
    Verified,
    Failed,
    Pending,
}

impl ZoneStatus {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// TXT record that proves ownership of a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtVerification {
    pub name: String,
    pub token: String,
}

/// A DNS zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub ttl: u32,
    /// `None` if the API reported a status this crate doesn't know.
    pub status: Option<ZoneStatus>,
    pub ns: Vec<String>,
    pub legacy_ns: Vec<String>,
    pub legacy_dns_host: String,
    pub owner: String,
    pub paused: bool,
    pub permission: String,
    pub project: String,
    pub registrar: String,
    pub records_count: u32,
    pub is_secondary_dns: bool,
    pub txt_verification: Option<TxtVerification>,
    pub created: ApiTime,
    pub modified: ApiTime,
    pub verified: ApiTime,
}

impl From<schema::Zone> for Zone {
    fn from(value: schema::Zone) -> Self {
        let txt = value.txt_verification;
        let txt_verification = (!txt.name.is_empty() || !txt.token.is_empty()).then(|| {
            TxtVerification {
                name: txt.name,
                token: txt.token,
            }
        });

        Self {
            id: value.id,
            name: value.name,
            ttl: value.ttl,
            status: value.status.parse().ok(),
            ns: value.ns,
            legacy_ns: value.legacy_ns,
            legacy_dns_host: value.legacy_dns_host,
            owner: value.owner,
            paused: value.paused,
            permission: value.permission,
            project: value.project,
            registrar: value.registrar,
            records_count: value.records_count,
            is_secondary_dns: value.is_secondary_dns,
            txt_verification,
            created: value.created,
            modified: value.modified,
            verified: value.verified,
        }
    }
}

/// Reference to a zone by its id.
///
/// Records and primary servers only ever carry the id of their zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ZoneRef {
    pub id: String,
}

impl From<&Zone> for ZoneRef {
    fn from(value: &Zone) -> Self {
        Self {
            id: value.id.clone(),
        }
    }
}

impl From<&str> for ZoneRef {
    fn from(value: &str) -> Self {
        Self {
            id: value.to_string(),
        }
    }
}

impl From<String> for ZoneRef {
    fn from(value: String) -> Self {
        Self { id: value }
    }
}

/// Result of validating a zone file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedZoneFile {
    /// How many records would be accepted.
    pub passed_records: u32,
    pub valid_records: Vec<Record>,
}

impl TryFrom<schema::ValidateZoneFileResponse> for ValidatedZoneFile {
    type Error = ClientError;

    fn try_from(value: schema::ValidateZoneFileResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            passed_records: value.passed_records,
            valid_records: value
                .valid_records
                .into_iter()
                .map(Record::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Options for listing zones.
#[derive(Debug, Clone, Default)]
pub struct ZoneListOpts {
    pub list: ListOpts,
    /// Exact zone name.
    pub name: String,
    /// Substring of the zone name.
    pub search_name: String,
}

impl ZoneListOpts {
    fn path(&self) -> String {
        self.list
            .query()
            .add_if_not_empty("name", &self.name)
            .add_if_not_empty("search_name", &self.search_name)
            .to_path(PATH_ZONES)
    }
}

/// Options for creating a zone.
#[derive(Debug, Clone, Default)]
pub struct ZoneCreateOpts {
    pub name: String,
    /// Default TTL of the zone's records. The API picks one if unset.
    pub ttl: Option<u32>,
}

impl ZoneCreateOpts {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        Ok(())
    }
}

/// Options for updating a zone.
#[derive(Debug, Clone, Default)]
pub struct ZoneUpdateOpts {
    pub name: String,
    pub ttl: Option<u32>,
}

impl ZoneUpdateOpts {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        Ok(())
    }
}

/// Client for the zones API, obtained from [Client::zone].
#[derive(Clone, Copy)]
pub struct ZoneClient<'a> {
    client: &'a Client,
}

impl<'a> ZoneClient<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the zones matching `opts`.
    pub fn list(&self, opts: &ZoneListOpts) -> Result<(Vec<Zone>, Response), ClientError> {
        let req = self.client.new_request(Method::GET, &opts.path(), None)?;
        let (body, resp) = self.client.execute_json::<schema::ZoneListResponse>(req)?;

        Ok((body.zones.into_iter().map(Zone::from).collect(), resp))
    }

    /// Retrieves the zone with the given id.
    pub fn get_by_id(&self, id: &str) -> Result<(Zone, Response), ClientError> {
        let req = self
            .client
            .new_request(Method::GET, &resource_path(PATH_ZONES, id)?, None)?;
        let (body, resp) = self.client.execute_json::<schema::ZoneResponse>(req)?;

        Ok((body.zone.into(), resp))
    }

    /// Creates a zone.
    ///
    /// # Errors
    ///
    /// Will return a `Validation` error without sending anything if the name
    /// is empty.
    pub fn create(&self, opts: &ZoneCreateOpts) -> Result<(Zone, Response), ClientError> {
        opts.validate()?;

        let body = RequestBody::json(&schema::ZoneRequest {
            name: &opts.name,
            ttl: opts.ttl,
        })?;
        let req = self.client.new_request(Method::POST, PATH_ZONES, Some(body))?;
        let (body, resp) = self.client.execute_json::<schema::ZoneResponse>(req)?;

        Ok((body.zone.into(), resp))
    }

    /// Updates the zone with the given id.
    ///
    /// # Errors
    ///
    /// Will return a `Validation` error without sending anything if the name
    /// is empty.
    pub fn update(
        &self,
        id: &str,
        opts: &ZoneUpdateOpts,
    ) -> Result<(Zone, Response), ClientError> {
        opts.validate()?;

        let body = RequestBody::json(&schema::ZoneRequest {
            name: &opts.name,
            ttl: opts.ttl,
        })?;
        let req = self
            .client
            .new_request(Method::PUT, &resource_path(PATH_ZONES, id)?, Some(body))?;
        let (body, resp) = self.client.execute_json::<schema::ZoneResponse>(req)?;

        Ok((body.zone.into(), resp))
    }

    /// Deletes the zone and all of its records.
    pub fn delete(&self, id: &str) -> Result<Response, ClientError> {
        let req = self
            .client
            .new_request(Method::DELETE, &resource_path(PATH_ZONES, id)?, None)?;

        self.client.execute(req)
    }

    /// Replaces the zone's records with those in a zone file.
    pub fn import<R: Read>(&self, id: &str, mut file: R) -> Result<(Zone, Response), ClientError> {
        let mut text = Vec::new();
        file.read_to_end(&mut text)?;

        let req = self.client.new_request(
            Method::POST,
            &format!("{}/import", resource_path(PATH_ZONES, id)?),
            Some(RequestBody::text(text)),
        )?;
        let (body, resp) = self.client.execute_json::<schema::ZoneResponse>(req)?;

        Ok((body.zone.into(), resp))
    }

    /// Exports the zone as a zone file.
    pub fn export(&self, id: &str) -> Result<(Cursor<Vec<u8>>, Response), ClientError> {
        let path = format!("{}/export", resource_path(PATH_ZONES, id)?);
        let req = self.client.new_request(Method::GET, &path, None)?;

        let mut file = Vec::new();
        let resp = self.client.execute_into(req, &mut file)?;

        Ok((Cursor::new(file), resp))
    }

    /// Checks a zone file without importing it.
    pub fn validate_file<R: Read>(
        &self,
        mut file: R,
    ) -> Result<(ValidatedZoneFile, Response), ClientError> {
        let mut text = Vec::new();
        file.read_to_end(&mut text)?;

        let req = self.client.new_request(
            Method::POST,
            &format!("{PATH_ZONES}/file/validate"),
            Some(RequestBody::text(text)),
        )?;
        let (body, resp) = self
            .client
            .execute_json::<schema::ValidateZoneFileResponse>(req)?;

        Ok((body.try_into()?, resp))
    }
}
