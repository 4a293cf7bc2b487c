//! Reconciles the two response envelope shapes into one [`Envelope`].
//!
//! The API answers either *wrapped* (`{id, timestamp, api_version, object: "response",
//! data}`) or *bare* (the service fields at top level, envelope fields optional).
//! Precedence, first match wins:
//! 1. `object == "response"`: decode as wrapped.
//! 2. the payload decodes as the expected data type: wrap it, defaulting missing
//!    envelope fields to `"unknown"` / the current unix time in milliseconds.
//! 3. decode as wrapped; failure here is a [`ResponseFormatError`].
//!
//! Only JSON objects qualify for either shape.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::Envelope;

const WRAPPED_OBJECT: &str = "response";
const UNKNOWN: &str = "unknown";

/// A 2xx response body matched neither accepted shape.
///
/// This is a broken contract on the server side, not a caller error.
#[derive(Debug, thiserror::Error)]
#[error("Invalid response format from API")]
pub struct ResponseFormatError {
    #[source]
    source: serde_json::Error,
}

impl ResponseFormatError {
    /// Status reported for every response-format failure.
    pub const STATUS: &'static str = "validation_error";

    pub fn status(&self) -> &'static str {
        Self::STATUS
    }

    pub(crate) fn new(source: serde_json::Error) -> Self {
        Self { source }
    }
}

#[derive(Debug, Deserialize)]
struct WireEnvelope<T> {
    id: String,
    #[serde(deserialize_with = "crate::domain::timestamp::deserialize")]
    timestamp: i64,
    api_version: String,
    object: String,
    data: T,
}

impl<T> From<WireEnvelope<T>> for Envelope<T> {
    fn from(value: WireEnvelope<T>) -> Self {
        Envelope {
            id: value.id,
            timestamp: value.timestamp,
            api_version: value.api_version,
            object: value.object,
            data: value.data,
        }
    }
}

/// Envelope fields that may accompany a bare payload.
#[derive(Debug, Default, Deserialize)]
struct BareEnvelopeFields {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, deserialize_with = "crate::domain::timestamp::deserialize_option")]
    timestamp: Option<i64>,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    object: Option<String>,
}

pub fn normalize<T: DeserializeOwned>(raw: Value) -> Result<Envelope<T>, ResponseFormatError> {
    normalize_at(raw, now_millis())
}

pub(crate) fn normalize_at<T: DeserializeOwned>(
    raw: Value,
    now_millis: i64,
) -> Result<Envelope<T>, ResponseFormatError> {
    // Derived structs also accept sequences positionally; reject those up front.
    let raw = serde_json::from_value::<Map<String, Value>>(raw)
        .map(Value::Object)
        .map_err(ResponseFormatError::new)?;

    if raw.get("object").and_then(Value::as_str) == Some(WRAPPED_OBJECT) {
        return decode_wrapped(raw);
    }

    if let Ok(data) = T::deserialize(&raw) {
        let fields = BareEnvelopeFields::deserialize(&raw).map_err(ResponseFormatError::new)?;
        return Ok(Envelope {
            id: fields.id.unwrap_or_else(|| UNKNOWN.to_owned()),
            timestamp: fields.timestamp.unwrap_or(now_millis),
            api_version: fields.api_version.unwrap_or_else(|| UNKNOWN.to_owned()),
            object: fields.object.unwrap_or_else(|| UNKNOWN.to_owned()),
            data,
        });
    }

    decode_wrapped(raw)
}

fn decode_wrapped<T: DeserializeOwned>(raw: Value) -> Result<Envelope<T>, ResponseFormatError> {
    serde_json::from_value::<WireEnvelope<T>>(raw)
        .map(Envelope::from)
        .map_err(ResponseFormatError::new)
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::domain::{JsonObject, MessageSent};

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn wrapped_envelope_is_flattened_with_its_metadata() {
        let raw = json!({
            "id": "x",
            "timestamp": 1,
            "api_version": "v1",
            "object": "response",
            "data": {"message_id": "m1"}
        });

        let response = normalize_at::<MessageSent>(raw, NOW)
            .unwrap()
            .into_response();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "message_id": "m1",
                "metadata": {"id": "x", "timestamp": 1, "api_version": "v1", "object": "response"}
            })
        );
    }

    #[test]
    fn bare_payload_gets_default_metadata() {
        let raw = json!({"message_id": "m1"});

        let response = normalize_at::<MessageSent>(raw, NOW)
            .unwrap()
            .into_response();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "message_id": "m1",
                "metadata": {"id": "unknown", "timestamp": NOW, "api_version": "unknown", "object": "unknown"}
            })
        );
    }

    #[test]
    fn bare_payload_keeps_intermixed_envelope_fields() {
        let raw = json!({
            "message_id": "m1",
            "id": "req_9",
            "timestamp": 42,
            "api_version": "v2025.8.20",
            "object": "text"
        });

        let envelope = normalize_at::<MessageSent>(raw, NOW).unwrap();
        assert_eq!(envelope.id, "req_9");
        assert_eq!(envelope.timestamp, 42);
        assert_eq!(envelope.api_version, "v2025.8.20");
        assert_eq!(envelope.object, "text");
        assert_eq!(envelope.data.message_id, "m1");
    }

    #[test]
    fn null_envelope_fields_fall_back_to_defaults() {
        let raw = json!({"message_id": "m1", "id": null, "timestamp": null});

        let envelope = normalize_at::<MessageSent>(raw, NOW).unwrap();
        assert_eq!(envelope.id, "unknown");
        assert_eq!(envelope.timestamp, NOW);
    }

    #[test]
    fn bare_payload_with_mistyped_envelope_field_is_rejected() {
        let raw = json!({"message_id": "m1", "timestamp": "yesterday"});

        let err = normalize_at::<MessageSent>(raw, NOW).unwrap_err();
        assert_eq!(err.status(), "validation_error");
    }

    #[test]
    fn payload_matching_neither_shape_is_a_format_error() {
        let raw = json!({"unexpected": true});

        let err = normalize_at::<MessageSent>(raw, NOW).unwrap_err();
        assert_eq!(err.to_string(), "Invalid response format from API");
        assert_eq!(err.status(), ResponseFormatError::STATUS);
    }

    #[test]
    fn arrays_and_scalars_are_format_errors() {
        for raw in [
            json!(["m1"]),
            json!(["x", 1, "v1", "response", {"message_id": "m1"}]),
            json!("m1"),
            json!(42),
            json!(null),
        ] {
            let err = normalize_at::<MessageSent>(raw.clone(), NOW).unwrap_err();
            assert_eq!(err.status(), ResponseFormatError::STATUS, "{raw}");
        }
        assert!(normalize_at::<JsonObject>(json!([{"a": 1}]), NOW).is_err());
    }

    #[test]
    fn float_timestamps_are_accepted_in_both_shapes() {
        let wrapped = json!({
            "id": "x",
            "timestamp": 1700000000000.0,
            "api_version": "v1",
            "object": "response",
            "data": {"message_id": "m1"}
        });
        let envelope = normalize_at::<MessageSent>(wrapped, NOW).unwrap();
        assert_eq!(envelope.timestamp, 1_700_000_000_000);

        let bare = json!({"message_id": "m1", "timestamp": 42.7});
        let envelope = normalize_at::<MessageSent>(bare, NOW).unwrap();
        assert_eq!(envelope.timestamp, 42);
    }

    #[test]
    fn object_response_always_takes_the_wrapped_path() {
        // Would decode as bare `MessageSent`, but `object: "response"` wins and `data` is missing.
        let raw = json!({"object": "response", "message_id": "m1"});

        assert!(normalize_at::<MessageSent>(raw, NOW).is_err());
    }

    #[test]
    fn wrapped_fallback_applies_when_object_is_not_response() {
        let raw = json!({
            "id": "x",
            "timestamp": 5,
            "api_version": "v1",
            "object": "text.send",
            "data": {"message_id": "m1"}
        });

        let envelope = normalize_at::<MessageSent>(raw, NOW).unwrap();
        assert_eq!(envelope.object, "text.send");
        assert_eq!(envelope.data.message_id, "m1");
    }

    #[test]
    fn open_object_data_accepts_any_bare_payload() {
        let raw = json!({"entitlements": ["imessage"]});

        let envelope = normalize_at::<JsonObject>(raw, NOW).unwrap();
        assert_eq!(envelope.data["entitlements"], json!(["imessage"]));
        assert_eq!(envelope.object, "unknown");
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct WithMetadataField {
        metadata: String,
    }

    #[test]
    fn data_field_named_metadata_loses_to_envelope_metadata_when_flattened() {
        let raw = json!({
            "id": "x",
            "timestamp": 1,
            "api_version": "v1",
            "object": "response",
            "data": {"metadata": "shadowed"}
        });

        let response = normalize_at::<WithMetadataField>(raw, NOW)
            .unwrap()
            .into_response();
        assert_eq!(response.data.metadata, "shadowed");
        let flat = serde_json::to_value(&response).unwrap();
        assert_eq!(flat["metadata"]["id"], json!("x"));
    }
}
