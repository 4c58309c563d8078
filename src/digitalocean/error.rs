use reqwest::StatusCode;
use thiserror::Error;

use crate::digitalocean::api::ErrorResponse;

/// Everything that can go wrong when talking to DigitalOcean.
///
/// Two families are kept apart: [`Error::Validation`] is produced locally, before any request
/// is sent, while every other variant comes from the transport or from the provider itself.
#[derive(Debug, Error)]
pub enum Error {
    /// The request was rejected locally and never sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The HTTP client could not complete the exchange.
    #[error("Request to DigitalOcean failed: {0}")]
    Request(#[from] reqwest::Error),
    /// DigitalOcean answered with a non-success status. The body is kept verbatim.
    #[error("DigitalOcean responded with {status}: {body}")]
    Api { status: StatusCode, body: String },
    /// A successful response did not carry the expected envelope field.
    #[error("Response is missing the '{0}' field")]
    MissingEnvelope(String),
    #[error("Unable to decode response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Access token cannot be used as a header: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// HTTP status of a provider error, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Request(e) => e.status(),
            _ => None,
        }
    }

    /// Decode the provider's `{ id, message, request_id }` error body, when there is one.
    pub fn error_response(&self) -> Option<ErrorResponse> {
        match self {
            Error::Api { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(e1), Self::Validation(e2)) => e1 == e2,
            (Self::Request(_), Self::Request(_)) => false,
            (
                Self::Api {
                    status: s1,
                    body: b1,
                },
                Self::Api {
                    status: s2,
                    body: b2,
                },
            ) => s1 == s2 && b1 == b2,
            (Self::MissingEnvelope(k1), Self::MissingEnvelope(k2)) => k1 == k2,
            (Self::Json(e1), Self::Json(e2)) => e1.to_string() == e2.to_string(),
            (Self::Url(e1), Self::Url(e2)) => e1 == e2,
            (Self::InvalidToken(e1), Self::InvalidToken(e2)) => e1.to_string() == e2.to_string(),
            _ => false,
        }
    }
}

/// Reasons a request body or identifier is refused before it reaches the network.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ValidationError {
    /// Names the object type that is missing required fields, e.g. "Load Balancer".
    #[error("Required fields missing from {0} Object")]
    MissingFields(&'static str),
    #[error("Project purpose is not valid")]
    InvalidProjectPurpose,
    #[error("URN expected in the format of 'do:resource_type:resource_id'")]
    InvalidUrn,
}
