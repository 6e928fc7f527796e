//! Primary servers of secondary zones.

use reqwest::Method;

use crate::zone::ZoneRef;
use crate::{
    ApiTime, Client, ClientError, Query, RequestBody, Response, ValidationError, resource_path,
    schema,
};

const PATH_PRIMARY_SERVERS: &str = "/primary_servers";

/// An authoritative server a secondary zone is transferred from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryServer {
    pub id: String,
    pub address: String,
    pub port: u16,
    pub zone: ZoneRef,
    pub created: ApiTime,
    pub modified: ApiTime,
}

impl From<schema::PrimaryServer> for PrimaryServer {
    fn from(value: schema::PrimaryServer) -> Self {
        Self {
            id: value.id,
            address: value.address,
            port: value.port,
            zone: value.zone_id.into(),
            created: value.created,
            modified: value.modified,
        }
    }
}

/// Options for listing primary servers.
#[derive(Debug, Clone, Default)]
pub struct PrimaryServerListOpts {
    pub zone_id: String,
}

impl PrimaryServerListOpts {
    fn path(&self) -> String {
        Query::new()
            .add_if_not_empty("zone_id", &self.zone_id)
            .to_path(PATH_PRIMARY_SERVERS)
    }
}

fn validate_primary_server(address: &str, port: u16, zone_id: &str) -> Result<(), ValidationError> {
    if address.is_empty() {
        return Err(ValidationError::AddressRequired);
    }
    if port == 0 {
        return Err(ValidationError::InvalidPort);
    }
    if zone_id.is_empty() {
        return Err(ValidationError::ZoneIdRequired);
    }
    Ok(())
}

/// Options for creating a primary server.
#[derive(Debug, Clone, Default)]
pub struct PrimaryServerCreateOpts {
    pub address: String,
    pub port: u16,
    pub zone_id: String,
}

impl PrimaryServerCreateOpts {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_primary_server(&self.address, self.port, &self.zone_id)
    }
}

/// Options for updating a primary server.
#[derive(Debug, Clone, Default)]
pub struct PrimaryServerUpdateOpts {
    pub address: String,
    pub port: u16,
    pub zone_id: String,
}

impl PrimaryServerUpdateOpts {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_primary_server(&self.address, self.port, &self.zone_id)
    }
}

/// Client for the primary servers API, obtained from [Client::primary_server].
#[derive(Clone, Copy)]
pub struct PrimaryServerClient<'a> {
    client: &'a Client,
}

impl<'a> PrimaryServerClient<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists primary servers, optionally only those of one zone.
    pub fn list(
        &self,
        opts: &PrimaryServerListOpts,
    ) -> Result<(Vec<PrimaryServer>, Response), ClientError> {
        let req = self.client.new_request(Method::GET, &opts.path(), None)?;
        let (body, resp) = self
            .client
            .execute_json::<schema::PrimaryServerListResponse>(req)?;

        Ok((
            body.primary_servers
                .into_iter()
                .map(PrimaryServer::from)
                .collect(),
            resp,
        ))
    }

    /// Retrieves the primary server with the given id.
    pub fn get_by_id(&self, id: &str) -> Result<(PrimaryServer, Response), ClientError> {
        let req = self.client.new_request(
            Method::GET,
            &resource_path(PATH_PRIMARY_SERVERS, id)?,
            None,
        )?;
        let (body, resp) = self
            .client
            .execute_json::<schema::PrimaryServerResponse>(req)?;

        Ok((body.primary_server.into(), resp))
    }

    /// Creates a primary server.
    ///
    /// # Errors
    ///
    /// Will return a `Validation` error without sending anything if the
    /// address or zone id is empty, or the port is 0.
    pub fn create(
        &self,
        opts: &PrimaryServerCreateOpts,
    ) -> Result<(PrimaryServer, Response), ClientError> {
        opts.validate()?;

        let body = RequestBody::json(&schema::PrimaryServerRequest {
            address: &opts.address,
            port: opts.port,
            zone_id: &opts.zone_id,
        })?;
        let req = self
            .client
            .new_request(Method::POST, PATH_PRIMARY_SERVERS, Some(body))?;
        let (body, resp) = self
            .client
            .execute_json::<schema::PrimaryServerResponse>(req)?;

        Ok((body.primary_server.into(), resp))
    }

    /// Updates the primary server with the given id.
    pub fn update(
        &self,
        id: &str,
        opts: &PrimaryServerUpdateOpts,
    ) -> Result<(PrimaryServer, Response), ClientError> {
        opts.validate()?;

        let body = RequestBody::json(&schema::PrimaryServerRequest {
            address: &opts.address,
            port: opts.port,
            zone_id: &opts.zone_id,
        })?;
        let req = self.client.new_request(
            Method::PUT,
            &resource_path(PATH_PRIMARY_SERVERS, id)?,
            Some(body),
        )?;
        let (body, resp) = self
            .client
            .execute_json::<schema::PrimaryServerResponse>(req)?;

        Ok((body.primary_server.into(), resp))
    }

    /// Deletes the primary server.
    pub fn delete(&self, id: &str) -> Result<Response, ClientError> {
        let req = self.client.new_request(
            Method::DELETE,
            &resource_path(PATH_PRIMARY_SERVERS, id)?,
            None,
        )?;

        self.client.execute(req)
    }
}
