use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::Response;

/// A required option was missing or out of range.
///
/// Raised before any request is sent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("id required")]
    IdRequired,
    #[error("invalid id")]
    InvalidId,
    #[error("name required")]
    NameRequired,
    #[error("type required")]
    TypeRequired,
    #[error("value required")]
    ValueRequired,
    #[error("zone required")]
    ZoneRequired,
    #[error("address required")]
    AddressRequired,
    #[error("invalid port")]
    InvalidPort,
    #[error("zone_id required")]
    ZoneIdRequired,
}

/// The API answered with a status in the 400-599 range.
///
/// The full response, including any parsed meta data, is kept so callers can
/// inspect it.
#[derive(Error, Debug)]
#[error("server responded with status code {}", .status.as_u16())]
pub struct ApiError {
    status: StatusCode,
    message: Option<String>,
    response: Box<Response>,
}

impl ApiError {
    pub(crate) fn from_response(response: Response) -> Self {
        #[derive(Deserialize)]
        struct ErrorResp {
            error: ErrorBody,
        }

        #[derive(Deserialize)]
        struct ErrorBody {
            message: String,
        }

        let message = serde_json::from_slice::<ErrorResp>(response.body())
            .ok()
            .map(|r| r.error.message)
            .filter(|m| !m.is_empty());

        Self {
            status: response.status(),
            message,
            response: Box::new(response),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The error message from the response body, if the API sent one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn into_response(self) -> Response {
        *self.response
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("authorization token contains invalid characters")]
    InvalidToken,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Server(#[from] ApiError),
    #[error("error decoding {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("error encoding request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("unknown record type {0:?}")]
    UnknownRecordType(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
}

impl ClientError {
    pub(crate) fn decode(context: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Decode { context, source }
    }

    /// The response that came with the error, if the server answered at all.
    pub fn response(&self) -> Option<&Response> {
        match self {
            ClientError::Server(e) => Some(e.response()),
            _ => None,
        }
    }

    /// The HTTP status of a server error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Server(e) => Some(e.status()),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientBuilderError {
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}
