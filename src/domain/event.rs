use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::domain::validation::ValidationError;

/// Webhook event names (v2 format).
///
/// Names this crate does not know yet are kept as [`WebhookEventType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum WebhookEventType {
    TextIncomingSms,
    TextIncomingMms,
    TextDeliveryConfirmed,
    TextDeliveryFailed,
    ImessageIncoming,
    NumbersSubstitution,
    OtpReverseVerified,
    EmailIncoming,
    IdentityVerificationSessionStarted,
    IdentityVerificationSessionProcessing,
    IdentityVerificationSessionVerified,
    IdentityVerificationSessionFailed,
    IdentityVerificationSessionRequiresInput,
    IdentityVerificationSessionManuallyApproved,
    IdentityVerificationSessionManuallyDenied,
    IdentityVerificationReportGenerated,
    Other(String),
}

impl WebhookEventType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::TextIncomingSms => "text.incoming.sms",
            Self::TextIncomingMms => "text.incoming.mms",
            Self::TextDeliveryConfirmed => "text.delivery.confirmed",
            Self::TextDeliveryFailed => "text.delivery.failed",
            Self::ImessageIncoming => "imessage.incoming",
            Self::NumbersSubstitution => "numbers.substitution",
            Self::OtpReverseVerified => "otp.reverse.verified",
            Self::EmailIncoming => "email.incoming",
            Self::IdentityVerificationSessionStarted => "identity.verification_session.started",
            Self::IdentityVerificationSessionProcessing => {
                "identity.verification_session.processing"
            }
            Self::IdentityVerificationSessionVerified => "identity.verification_session.verified",
            Self::IdentityVerificationSessionFailed => "identity.verification_session.failed",
            Self::IdentityVerificationSessionRequiresInput => {
                "identity.verification_session.requires_input"
            }
            Self::IdentityVerificationSessionManuallyApproved => {
                "identity.verification_session.manually_approved"
            }
            Self::IdentityVerificationSessionManuallyDenied => {
                "identity.verification_session.manually_denied"
            }
            Self::IdentityVerificationReportGenerated => "identity.verification_report.generated",
            Self::Other(name) => name,
        }
    }

    /// Whether the event carries an inbound message that can be replied to.
    pub fn is_incoming_message(&self) -> bool {
        matches!(
            self,
            Self::TextIncomingSms | Self::TextIncomingMms | Self::ImessageIncoming
        )
    }
}

impl FromStr for WebhookEventType {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "text.incoming.sms" => Self::TextIncomingSms,
            "text.incoming.mms" => Self::TextIncomingMms,
            "text.delivery.confirmed" => Self::TextDeliveryConfirmed,
            "text.delivery.failed" => Self::TextDeliveryFailed,
            "imessage.incoming" => Self::ImessageIncoming,
            "numbers.substitution" => Self::NumbersSubstitution,
            "otp.reverse.verified" => Self::OtpReverseVerified,
            "email.incoming" => Self::EmailIncoming,
            "identity.verification_session.started" => Self::IdentityVerificationSessionStarted,
            "identity.verification_session.processing" => {
                Self::IdentityVerificationSessionProcessing
            }
            "identity.verification_session.verified" => Self::IdentityVerificationSessionVerified,
            "identity.verification_session.failed" => Self::IdentityVerificationSessionFailed,
            "identity.verification_session.requires_input" => {
                Self::IdentityVerificationSessionRequiresInput
            }
            "identity.verification_session.manually_approved" => {
                Self::IdentityVerificationSessionManuallyApproved
            }
            "identity.verification_session.manually_denied" => {
                Self::IdentityVerificationSessionManuallyDenied
            }
            "identity.verification_report.generated" => Self::IdentityVerificationReportGenerated,
            other => Self::Other(other.to_owned()),
        })
    }
}

impl From<&str> for WebhookEventType {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WebhookEventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WebhookEventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from(name.as_str()))
    }
}

/// Inbound webhook delivery, built fresh from each request body.
///
/// Only `id`, `type`, and `timestamp` are checked when parsing; `data` is passed
/// through untouched and its shape depends on [`WebhookEvent::event_type`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: WebhookEventType,
    /// Unix seconds. A fractional value in the payload is truncated toward zero, so only
    /// integer timestamps serialize back unchanged.
    #[serde(deserialize_with = "crate::domain::timestamp::deserialize")]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl WebhookEvent {
    /// String field from `data`, if present.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Addresses for answering an incoming message: `(to, from)` where `to` is the
    /// original sender and `from` is your number that received it.
    pub fn reply_addresses(&self) -> Result<(&str, &str), ValidationError> {
        let sender = self
            .data_str("from")
            .ok_or(ValidationError::MissingReplyAddress { field: "data.from" })?;
        let recipient = self
            .data_str("to")
            .ok_or(ValidationError::MissingReplyAddress { field: "data.to" })?;
        Ok((sender, recipient))
    }
}
