//! Emergency request model and the JSON bodies exchanged over the API.

use crate::error::FloodError;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Request priority. Higher values are served first.
///
/// Holds the JSON number exactly as submitted, so `5` is echoed and
/// exported as `5` and `2.5` as `2.5`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(Number);

impl Priority {
    /// Builds a priority from a float. NaN and infinities are rejected.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self)
    }

    /// Exact value for integer priorities, which may exceed f64 precision
    fn as_integer(&self) -> Option<i128> {
        self.0
            .as_i64()
            .map(i128::from)
            .or_else(|| self.0.as_u64().map(i128::from))
    }

    fn as_float(&self) -> f64 {
        self.0.as_f64().unwrap_or(0.0)
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Self(Number::from(value))
    }
}

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

/// Integers compare exactly; anything involving a fraction compares as f64.
impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.as_integer(), other.as_integer()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => self.as_float().partial_cmp(&other.as_float()),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reported emergency request. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyRequest {
    pub id: u64,
    pub description: String,
    pub priority: Priority,
}

impl EmergencyRequest {
    pub fn new(id: u64, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            id,
            description: description.into(),
            priority,
        }
    }
}

/// Body of `POST /report` before validation.
///
/// Fields are kept as raw JSON so a wrongly typed field is a validation
/// failure rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportPayload {
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub priority: Option<Value>,
}

/// A report that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidReport {
    pub description: String,
    pub priority: Priority,
}

impl ReportPayload {
    /// Parse a raw request body. Anything but a JSON object is invalid.
    pub fn from_body(body: &[u8]) -> Result<Self, FloodError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| FloodError::InvalidInput(format!("malformed JSON body: {}", e)))?;
        if !value.is_object() {
            return Err(FloodError::InvalidInput(
                "body must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| FloodError::InvalidInput(e.to_string()))
    }

    pub fn validate(self) -> Result<ValidReport, FloodError> {
        let description = match self.description {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => {
                return Err(FloodError::InvalidInput(
                    "description must be a non-empty string".to_string(),
                ))
            }
        };

        let priority = match self.priority {
            Some(Value::Number(n)) => Priority(n),
            _ => {
                return Err(FloodError::InvalidInput(
                    "priority must be a number".to_string(),
                ))
            }
        };

        Ok(ValidReport {
            description,
            priority,
        })
    }
}

/// 201 body of `POST /report`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub message: String,
    #[serde(rename = "newRequest")]
    pub new_request: EmergencyRequest,
}

/// 200 body of `GET /dispatch`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResponse {
    pub message: String,
    pub service: EmergencyRequest,
}

/// 200 body of `POST /undo`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoResponse {
    pub message: String,
    #[serde(rename = "lastDispatched")]
    pub last_dispatched: EmergencyRequest,
}

/// 200 body of `GET /generate-daily-log`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub message: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
}

/// Body of 404 responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of 400 and 500 responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Pending requests in dispatch order and dispatched requests bottom to top
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    pub pending: Vec<EmergencyRequest>,
    pub dispatched: Vec<EmergencyRequest>,
}
