use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status reported by the API or the client: an HTTP-style code or a symbolic name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiStatus {
    Code(u16),
    Text(String),
}

impl ApiStatus {
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Text(_) => None,
        }
    }
}

impl From<u16> for ApiStatus {
    fn from(value: u16) -> Self {
        Self::Code(value)
    }
}

impl From<&str> for ApiStatus {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Message and status extracted from a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub message: String,
    pub status: ApiStatus,
}

/// Decodes the body of a failed response.
///
/// `{data: {status, error}}` wins; then top-level `message`/`error` with `status`;
/// anything else (including a non-JSON body) becomes `HTTP <code>: <reason>`.
pub fn decode_error_envelope(http_status: u16, body: &[u8]) -> ErrorEnvelope {
    let fallback = || ErrorEnvelope {
        message: http_message(http_status),
        status: ApiStatus::Code(http_status),
    };

    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        return fallback();
    };

    if let Some(data) = json.get("data").filter(|data| data.is_object()) {
        if let Some(message) = data.get("error").and_then(Value::as_str) {
            return ErrorEnvelope {
                message: message.to_owned(),
                status: status_from(data.get("status")).unwrap_or(ApiStatus::Code(http_status)),
            };
        }
    }

    let message = json
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| json.get("error").and_then(Value::as_str));
    match message {
        Some(message) => ErrorEnvelope {
            message: message.to_owned(),
            status: status_from(json.get("status")).unwrap_or(ApiStatus::Code(http_status)),
        },
        None => fallback(),
    }
}

fn status_from(value: Option<&Value>) -> Option<ApiStatus> {
    match value? {
        Value::Number(number) => number
            .as_u64()
            .and_then(|code| u16::try_from(code).ok())
            .map(ApiStatus::Code),
        Value::String(text) => Some(ApiStatus::Text(text.clone())),
        _ => None,
    }
}

fn http_message(http_status: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(http_status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown Status");
    format!("HTTP {http_status}: {reason}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_data_error_takes_priority() {
        let body = br#"{"message":"outer","data":{"status":"invalid_number","error":"bad number"}}"#;

        let envelope = decode_error_envelope(400, body);
        assert_eq!(envelope.message, "bad number");
        assert_eq!(envelope.status, ApiStatus::Text("invalid_number".to_owned()));
    }

    #[test]
    fn top_level_message_uses_http_code_when_status_missing() {
        let envelope = decode_error_envelope(422, br#"{"message":"Unprocessable"}"#);
        assert_eq!(envelope.message, "Unprocessable");
        assert_eq!(envelope.status, ApiStatus::Code(422));

        let envelope = decode_error_envelope(403, br#"{"error":"forbidden","status":401}"#);
        assert_eq!(envelope.message, "forbidden");
        assert_eq!(envelope.status, ApiStatus::Code(401));
    }

    #[test]
    fn unrecognized_body_falls_back_to_reason_phrase() {
        let envelope = decode_error_envelope(404, b"<html>not found</html>");
        assert_eq!(envelope.message, "HTTP 404: Not Found");
        assert_eq!(envelope.status, ApiStatus::Code(404));

        let envelope = decode_error_envelope(500, br#"{"data":{"status":500}}"#);
        assert_eq!(envelope.message, "HTTP 500: Internal Server Error");
    }

    #[test]
    fn status_displays_code_or_text() {
        assert_eq!(ApiStatus::from(500).to_string(), "500");
        assert_eq!(ApiStatus::from("rate_limited").to_string(), "rate_limited");
        assert_eq!(ApiStatus::from(429).code(), Some(429));
    }
}
