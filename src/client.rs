use std::borrow::Cow;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::blocking::Request;
use reqwest::header::{CONTENT_TYPE, HeaderMap, USER_AGENT};
use reqwest::{Method, StatusCode, Version};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::primary_server::PrimaryServerClient;
use crate::record::RecordClient;
use crate::zone::ZoneClient;
use crate::{ApiError, ClientBuilderError, ClientError, Query, schema};

/// The production API root.
pub const ENDPOINT: &str = "https://dns.hetzner.com/api/v1";

/// Identifies this library in the `User-Agent` header.
pub const LIBRARY_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const TOKEN_HEADER: &str = "Auth-API-Token";
const TOKEN_LEN: usize = 32;

/// Whether `token` is exactly 32 ASCII alphanumeric characters.
fn is_valid_token(token: &str) -> bool {
    token.len() == TOKEN_LEN && token.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn build_user_agent(application: Option<&(String, String)>) -> String {
    match application {
        Some((name, version)) if !name.is_empty() && !version.is_empty() => {
            format!("{name}/{version} {LIBRARY_USER_AGENT}")
        }
        Some((name, _)) if !name.is_empty() => format!("{name} {LIBRARY_USER_AGENT}"),
        _ => LIBRARY_USER_AGENT.to_string(),
    }
}

type DebugWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Builder for a [Client] that handles default values.
#[derive(Default)]
pub struct ClientBuilder {
    endpoint: Option<String>,
    token: Option<String>,
    application: Option<(String, String)>,
    http_client: Option<reqwest::blocking::Client>,
    debug_writer: Option<Box<dyn Write + Send>>,
}

impl ClientBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the API endpoint to the one given.
    ///
    /// Trailing slashes are removed.
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    /// In the case that `endpoint` is the Some variant, sets the API endpoint to it.
    pub fn endpoint_if_some(mut self, endpoint: Option<&str>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint.to_string());
        }
        self
    }

    /// Sets the API token used for authorization.
    ///
    /// A token that isn't exactly 32 alphanumeric characters makes every
    /// request fail with [`ClientError::InvalidToken`].
    pub fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Prefixes the user agent with an application name and version.
    ///
    /// The version may be empty.
    pub fn application(mut self, name: &str, version: &str) -> Self {
        self.application = Some((name.to_string(), version.to_string()));
        self
    }

    /// Uses the given HTTP client for all requests.
    ///
    /// Timeouts and proxies are configured on this client.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Writes a dump of every request and response to `writer`.
    ///
    /// The authorization token is redacted.
    pub fn debug_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.debug_writer = Some(Box::new(writer));
        self
    }

    /// Builds a [Client] from the builder.
    ///
    /// In the case that no API endpoint is set, [ENDPOINT] is used.
    ///
    /// # Errors
    /// - `UrlParse` if the endpoint isn't a valid URL.
    /// - `Reqwest` if the default HTTP client can't be created.
    pub fn build(self) -> Result<Client, ClientBuilderError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .unwrap_or(ENDPOINT)
            .trim_end_matches('/')
            .to_string();
        Url::parse(&endpoint)?;

        let http = match self.http_client {
            Some(client) => client,
            None => reqwest::blocking::Client::builder().build()?,
        };

        let token_valid = self.token.as_deref().is_none_or(is_valid_token);

        Ok(Client {
            endpoint,
            token: self.token,
            token_valid,
            user_agent: build_user_agent(self.application.as_ref()),
            http,
            debug_writer: self.debug_writer.map(|w| Arc::new(Mutex::new(w))),
        })
    }
}

/// Body of an outgoing request, with its content type.
#[derive(Debug, Clone)]
pub struct RequestBody {
    content_type: &'static str,
    bytes: Vec<u8>,
}

impl RequestBody {
    /// A JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ClientError> {
        Ok(Self {
            content_type: "application/json",
            bytes: serde_json::to_vec(value).map_err(ClientError::Encode)?,
        })
    }

    /// A plain text body, such as a zone file.
    pub fn text(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: "text/plain",
            bytes: bytes.into(),
        }
    }
}

/// Pagination meta information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub last_page: u32,
    pub page: u32,
    pub per_page: u32,
    pub total_entries: u32,
}

impl From<schema::MetaPagination> for Pagination {
    fn from(value: schema::MetaPagination) -> Self {
        Self {
            last_page: value.last_page,
            page: value.page,
            per_page: value.per_page,
            total_entries: value.total_entries,
        }
    }
}

/// Meta information included in an API response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    pub pagination: Option<Pagination>,
}

impl Meta {
    fn read(headers: &HeaderMap, body: &[u8]) -> Result<Self, serde_json::Error> {
        let is_json = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));
        if !is_json || body.is_empty() {
            return Ok(Self::default());
        }

        let resp: schema::MetaResponse = serde_json::from_slice(body)?;
        Ok(Self {
            pagination: resp
                .meta
                .and_then(|m| m.pagination)
                .map(Pagination::from),
        })
    }
}

/// A fully read response from the API.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: Vec<u8>,
    meta: Meta,
}

impl Response {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Shorthand for the pagination in [Response::meta].
    pub fn pagination(&self) -> Option<&Pagination> {
        self.meta.pagination.as_ref()
    }
}

/// Options for listing paginated resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOpts {
    pub page: u32,
    pub per_page: u32,
}

impl ListOpts {
    pub(crate) fn query(&self) -> Query {
        Query::new()
            .add_if_positive("page", self.page)
            .add_if_positive("per_page", self.per_page)
    }
}

/// API client.
///
/// Configuration is fixed once built, so a client can be cloned and shared
/// between threads.
#[derive(Clone)]
pub struct Client {
    endpoint: String,
    token: Option<String>,
    token_valid: bool,
    user_agent: String,
    http: reqwest::blocking::Client,
    debug_writer: Option<DebugWriter>,
}

impl Client {
    /// Creates an unauthenticated client against [ENDPOINT].
    pub fn new() -> Result<Self, ClientBuilderError> {
        Self::builder().build()
    }

    /// Returns a builder for a Client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The API root, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Operations on zones.
    pub fn zone(&self) -> ZoneClient<'_> {
        ZoneClient::new(self)
    }

    /// Operations on records.
    pub fn record(&self) -> RecordClient<'_> {
        RecordClient::new(self)
    }

    /// Operations on primary servers.
    pub fn primary_server(&self) -> PrimaryServerClient<'_> {
        PrimaryServerClient::new(self)
    }

    /// Creates a request against `path`, relative to the endpoint.
    ///
    /// The request carries the user agent, the token if there is one, and
    /// the content type of `body`.
    ///
    /// # Errors
    /// - `InvalidToken` if the configured token is malformed. Nothing is sent.
    pub fn new_request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<Request, ClientError> {
        if !self.token_valid {
            return Err(ClientError::InvalidToken);
        }

        let url = Url::parse(&format!("{}{path}", self.endpoint))?;
        let mut builder = self
            .http
            .request(method, url)
            .header(USER_AGENT, self.user_agent.as_str());
        if let Some(token) = &self.token {
            builder = builder.header(TOKEN_HEADER, token.as_str());
        }
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, body.content_type)
                .body(body.bytes);
        }

        Ok(builder.build()?)
    }

    /// Sends the request and reads the whole response.
    ///
    /// Exactly one HTTP request is made; nothing is retried. Pagination meta
    /// data is read from JSON bodies whatever their shape.
    ///
    /// # Errors
    /// - `Server` for a 4xx or 5xx status. The error holds the response.
    /// - `Reqwest` or `Io` if the request couldn't be made or read.
    /// - `Decode` if a successful JSON response has malformed meta data.
    pub fn execute(&self, request: Request) -> Result<Response, ClientError> {
        log::debug!("{} {}", request.method(), request.url());
        if let Some(writer) = &self.debug_writer {
            write_dump(writer, "Request", &dump_request(&request))?;
        }

        let resp = self.http.execute(request)?;
        let status = resp.status();
        let version = resp.version();
        let headers = resp.headers().clone();
        let body = resp.bytes()?.to_vec();
        log::debug!("response status: {status}");

        let mut response = Response {
            status,
            version,
            headers,
            body,
            meta: Meta::default(),
        };
        if let Some(writer) = &self.debug_writer {
            write_dump(writer, "Response", &dump_response(&response))?;
        }

        let failed = status.is_client_error() || status.is_server_error();
        match Meta::read(&response.headers, &response.body) {
            Ok(meta) => response.meta = meta,
            Err(e) if !failed => return Err(ClientError::decode("response meta data")(e)),
            Err(e) => log::trace!("ignoring unreadable meta data: {e}"),
        }

        if failed {
            log::debug!("server responded with status code {}", status.as_u16());
            return Err(ApiError::from_response(response).into());
        }

        Ok(response)
    }

    /// Sends the request and decodes the JSON body into `T`.
    pub fn execute_json<T: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<(T, Response), ClientError> {
        let response = self.execute(request)?;
        let value = serde_json::from_slice(response.body()).map_err(|e| {
            log::debug!("unable to decode response body: {e}");
            ClientError::decode("response body")(e)
        })?;
        Ok((value, response))
    }

    /// Sends the request and copies the raw body into `sink`.
    pub fn execute_into<W: Write + ?Sized>(
        &self,
        request: Request,
        sink: &mut W,
    ) -> Result<Response, ClientError> {
        let response = self.execute(request)?;
        sink.write_all(response.body())?;
        Ok(response)
    }
}

fn write_dump(writer: &DebugWriter, title: &str, dump: &str) -> Result<(), ClientError> {
    let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
    write!(writer, "--- {title}:\n{dump}\n\n")?;
    writer.flush()?;
    Ok(())
}

fn dump_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let value = if name.as_str().eq_ignore_ascii_case(TOKEN_HEADER) {
            "REDACTED".into()
        } else {
            String::from_utf8_lossy(value.as_bytes())
        };
        out.push_str(&format!("{}: {value}\r\n", name.as_str()));
    }
}

fn dump_request(request: &Request) -> String {
    let url = request.url();
    let mut out = format!("{} {}", request.method(), url.path());
    if let Some(query) = url.query() {
        out.push_str(&format!("?{query}"));
    }
    out.push_str(" HTTP/1.1\r\n");
    if let Some(host) = url.host_str() {
        match url.port() {
            Some(port) => out.push_str(&format!("Host: {host}:{port}\r\n")),
            None => out.push_str(&format!("Host: {host}\r\n")),
        }
    }
    dump_headers(&mut out, request.headers());
    out.push_str("\r\n");
    if let Some(body) = request.body().and_then(|b| b.as_bytes()) {
        out.push_str(&String::from_utf8_lossy(body));
    }
    out
}

fn dump_response(response: &Response) -> String {
    let mut out = format!("{:?} {}\r\n", response.version, response.status);
    dump_headers(&mut out, &response.headers);
    out.push_str("\r\n");
    out.push_str(&response.text());
    out
}
