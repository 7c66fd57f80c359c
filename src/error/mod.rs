// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::time::Duration;

use http::{Method, StatusCode};
use serde::Deserialize;
use thiserror::Error;

#[allow(clippy::result_large_err)]
#[derive(Debug, Error)]
pub enum RedfishError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP error: {0}")]
    Http(#[from] hyper::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{method} {uri} returned {status}{}", detail(.error))]
    Status {
        method: Method,
        uri: String,
        status: StatusCode,
        error: Option<ServiceError>,
    },

    #[error("Failed to decode {uri}: {source}")]
    Decode {
        uri: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{0} declares no updatable properties")]
    NotUpdatable(&'static str),

    #[error("Resource {0} is not attached to a client")]
    Detached(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl RedfishError {
    /// HTTP status reported by the service, if this is a status error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RedfishError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the service answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

pub type Result<T> = std::result::Result<T, RedfishError>;

fn detail(error: &Option<ServiceError>) -> String {
    error.as_ref().map(|e| format!(": {e}")).unwrap_or_default()
}

/// The `error` object a Redfish service returns with a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "@Message.ExtendedInfo", default)]
    pub extended_info: Vec<ExtendedInfo>,
}

/// One `@Message.ExtendedInfo` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtendedInfo {
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
}

#[derive(Deserialize)]
struct ServiceErrorEnvelope {
    error: ServiceError,
}

impl ServiceError {
    /// Parse a service error body. Returns `None` for anything that is not
    /// a Redfish error document.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<ServiceErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error)
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Extended info is usually the more specific explanation.
        match self.extended_info.first() {
            Some(info) if !info.message.is_empty() => {
                write!(f, "{} ({})", info.message, info.message_id)
            }
            _ if !self.message.is_empty() => write!(f, "{}", self.message),
            _ => write!(f, "{}", self.code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_from_body() {
        let body = br#"{
            "error": {
                "code": "Base.1.8.GeneralError",
                "message": "A general error has occurred.",
                "@Message.ExtendedInfo": [{
                    "MessageId": "Base.1.8.PropertyNotWritable",
                    "Message": "The property RatedCurrentAmps is a read only property.",
                    "Severity": "Warning",
                    "Resolution": "Remove the property from the request body."
                }]
            }
        }"#;

        let error = ServiceError::from_body(body).unwrap();
        assert_eq!(error.code, "Base.1.8.GeneralError");
        assert_eq!(error.extended_info.len(), 1);
        assert_eq!(
            error.to_string(),
            "The property RatedCurrentAmps is a read only property. (Base.1.8.PropertyNotWritable)"
        );
    }

    #[test]
    fn test_service_error_not_redfish() {
        assert!(ServiceError::from_body(b"<html>Bad Gateway</html>").is_none());
        assert!(ServiceError::from_body(b"").is_none());
    }

    #[test]
    fn test_status_error_display() {
        let err = RedfishError::Status {
            method: Method::PATCH,
            uri: "/redfish/v1/Chassis/1".to_string(),
            status: StatusCode::BAD_REQUEST,
            error: Some(ServiceError {
                code: "Base.1.8.GeneralError".to_string(),
                message: "Bad property".to_string(),
                extended_info: Vec::new(),
            }),
        };
        assert_eq!(
            err.to_string(),
            "PATCH /redfish/v1/Chassis/1 returned 400 Bad Request: Bad property"
        );
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found() {
        let err = RedfishError::Status {
            method: Method::GET,
            uri: "/redfish/v1/Chassis/9".to_string(),
            status: StatusCode::NOT_FOUND,
            error: None,
        };
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "GET /redfish/v1/Chassis/9 returned 404 Not Found"
        );
    }
}
