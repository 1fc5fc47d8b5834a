use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope returned by write endpoints, on success and on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub request_method: String,
    pub param: Value,
    pub record: String,
    pub data: String,
}

impl ResponseEnvelope {
    pub fn post(param: Value, record: &str, data: impl Into<String>) -> Self {
        Self {
            request_method: "POST".to_string(),
            param,
            record: record.to_string(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub id: i64,
}
