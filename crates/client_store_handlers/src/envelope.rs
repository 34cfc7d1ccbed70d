//! Request/response envelopes at the invocation boundary.
//!
//! # Responsibility
//! - Model the proxy-style request (`pathParameters`, `body`) and response
//!   (`statusCode`, `headers`, `body`) shapes.
//! - Parse path parameters and JSON bodies into typed input.
//!
//! # Invariants
//! - `ResponseEnvelope::body` is always a serialized JSON document.
//! - Envelope fields this crate does not use are ignored on input.

use client_store_core::ClientFields;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTENT_TYPE_HEADER: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Inbound request envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl RequestEnvelope {
    /// Envelope carrying only a raw body.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            path_parameters: None,
            body: Some(body.into()),
        }
    }

    /// Adds or replaces one path parameter.
    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Returns a required path parameter.
    ///
    /// Empty or whitespace-only values count as missing.
    pub fn path_parameter(&self, name: &'static str) -> Result<&str, RequestError> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
            .ok_or(RequestError::MissingPathParameter(name))
    }

    /// Parses the body as JSON into `T`.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        let body = self.body.as_deref().ok_or(RequestError::MissingBody)?;
        serde_json::from_str(body).map_err(RequestError::InvalidBody)
    }
}

/// Outbound response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseEnvelope {
    /// JSON response with `status_code`.
    pub fn json(status_code: u16, payload: &Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string());
        Self {
            status_code,
            headers,
            body: payload.to_string(),
        }
    }

    /// Parses `body` back into a JSON value.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// Record fields as accepted in request bodies (lowercase keys).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<ClientInput> for ClientFields {
    fn from(value: ClientInput) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
        }
    }
}

/// Request could not be turned into handler input.
#[derive(Debug)]
pub enum RequestError {
    MissingBody,
    MissingPathParameter(&'static str),
    InvalidBody(serde_json::Error),
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBody => write!(f, "request body is missing"),
            Self::MissingPathParameter(name) => write!(f, "path parameter `{name}` is missing"),
            Self::InvalidBody(err) => write!(f, "request body is not valid JSON input: {err}"),
        }
    }
}

impl Error for RequestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBody(err) => Some(err),
            _ => None,
        }
    }
}
