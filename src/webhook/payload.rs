use serde_json::Value;

use crate::domain::timestamp;
use crate::domain::{WebhookEvent, WebhookEventType};

#[derive(Debug, thiserror::Error)]
pub enum MalformedPayload {
    #[error("invalid webhook payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid webhook payload: missing or invalid `{field}`")]
    MissingField { field: &'static str },
}

/// Parses a v2 webhook body.
///
/// `id` and `type` must be strings and `timestamp` a number, checked in that order.
/// Everything under `data` is kept as-is.
pub fn parse_payload(raw_body: &[u8]) -> Result<WebhookEvent, MalformedPayload> {
    let json: Value = serde_json::from_slice(raw_body)?;

    let id = json
        .get("id")
        .and_then(Value::as_str)
        .ok_or(MalformedPayload::MissingField { field: "id" })?;
    let event_type = json
        .get("type")
        .and_then(Value::as_str)
        .ok_or(MalformedPayload::MissingField { field: "type" })?;
    let timestamp = json
        .get("timestamp")
        .and_then(timestamp::from_number)
        .ok_or(MalformedPayload::MissingField { field: "timestamp" })?;

    Ok(WebhookEvent {
        id: id.to_owned(),
        event_type: WebhookEventType::from(event_type),
        timestamp,
        api_version: json
            .get("api_version")
            .and_then(Value::as_str)
            .map(str::to_owned),
        data: json.get("data").cloned().unwrap_or(Value::Null),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_known_event() {
        let body = br#"{
            "id": "evt_1",
            "type": "text.incoming.sms",
            "timestamp": 1700000000,
            "api_version": "v2",
            "data": {"from": "+15551234567", "to": "+15557654321", "message": "hi"}
        }"#;

        let event = parse_payload(body).unwrap();
        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, WebhookEventType::TextIncomingSms);
        assert_eq!(event.timestamp, 1_700_000_000);
        assert_eq!(event.api_version.as_deref(), Some("v2"));
        assert_eq!(event.data_str("message"), Some("hi"));
    }

    #[test]
    fn unknown_type_and_missing_data_still_parse() {
        let event = parse_payload(br#"{"id":"evt_2","type":"voice.call","timestamp":1.5}"#)
            .unwrap();
        assert_eq!(event.event_type.as_str(), "voice.call");
        assert_eq!(event.timestamp, 1);
        assert_eq!(event.data, Value::Null);
    }

    #[test]
    fn required_fields_are_checked_in_order() {
        let err = parse_payload(br#"{"type":"x"}"#).unwrap_err();
        assert!(matches!(err, MalformedPayload::MissingField { field: "id" }));

        let err = parse_payload(br#"{"id":"evt_1","type":7,"timestamp":1}"#).unwrap_err();
        assert!(matches!(err, MalformedPayload::MissingField { field: "type" }));

        let err = parse_payload(br#"{"id":"evt_1","type":"x","timestamp":"1"}"#).unwrap_err();
        assert!(matches!(
            err,
            MalformedPayload::MissingField { field: "timestamp" }
        ));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = parse_payload(b"{not json").unwrap_err();
        assert!(matches!(err, MalformedPayload::InvalidJson(_)));
        assert!(err.to_string().starts_with("invalid webhook payload"));
    }

    #[test]
    fn fractional_timestamp_truncates_and_deserializes_the_same_way() {
        let body = br#"{"id":"evt_4","type":"email.incoming","timestamp":1700000000.9}"#;
        let parsed = parse_payload(body).unwrap();
        assert_eq!(parsed.timestamp, 1_700_000_000);

        let derived: WebhookEvent = serde_json::from_slice(body).unwrap();
        assert_eq!(derived, parsed);
        assert_eq!(serde_json::to_value(&parsed).unwrap()["timestamp"], json!(1700000000));
    }

    #[test]
    fn parsed_event_serializes_back_to_the_same_shape() {
        let original = json!({
            "id": "evt_3",
            "type": "otp.reverse.verified",
            "timestamp": 1700000001,
            "data": {"otp_id": "otp_1"}
        });
        let event = parse_payload(original.to_string().as_bytes()).unwrap();
        assert_eq!(serde_json::to_value(&event).unwrap(), original);
    }
}
