use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct UrlCheckRequest {
    pub url: String, // Raw URL as submitted by the caller
    pub client_id: Option<String>, // Optional client identifier
}

#[derive(Debug, Serialize)]
pub struct UrlCheckResponse {
    pub check_id: String,
    pub url: String, // Normalized form actually sent to the check API
    pub safe: bool,
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

// Response body of the remote safety-check API. Unknown fields are ignored;
// absence of `error` means the URL passed the check.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteVerdict {
    pub url: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckedUrl {
    pub id: String,
    pub url: String,
    pub host: String,
    pub safe: bool,
    pub status: String,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub client_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
