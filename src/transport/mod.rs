//! Transport layer: endpoint descriptors and wire-format details (serialization/deserialization).

mod conversations;
mod domains;
mod email;
mod entitlements;
mod envelope;
mod error;
mod lease;
mod messaging;
mod otp;
mod text;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::Validate;

pub(crate) use conversations::{History, HistoryChannel, MessageLookup};
pub(crate) use domains::{DeleteDomain, DomainLookup, ListDomains};
pub(crate) use entitlements::{
    ApplyEntitlement, EntitlementLookup, ListEntitlements, RevokeEntitlement,
    entitlement_from_agreement,
};
pub use envelope::{ResponseFormatError, normalize};
pub use error::{ApiStatus, ErrorEnvelope, decode_error_envelope};
pub(crate) use lease::{
    AvailableNumbersQuery, LeaseDetails, LeasedNumbersQuery, NumberLookup, TerminateLease,
};
pub(crate) use messaging::{ImessageReaction, TypingChannel, TypingIndicator, WhatsappReaction};
pub(crate) use otp::{CancelReverseOtp, CheckReverseOtp};
pub(crate) use text::TextReactionRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// First path segment of every endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiBase {
    Send,
    Otp,
    Domains,
    Numbers,
    Conversations,
    Entitlements,
}

impl ApiBase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Otp => "otp",
            Self::Domains => "domains",
            Self::Numbers => "numbers",
            Self::Conversations => "conversations",
            Self::Entitlements => "entitlements",
        }
    }
}

/// One API operation: where it lives, what it sends, and what `data` decodes into.
///
/// [`Endpoint::path`] returns unencoded segments following the base; the client
/// percent-encodes each one. An empty trailing segment yields a trailing slash.
pub(crate) trait Endpoint: Validate {
    type Data: DeserializeOwned;

    const METHOD: Method;
    const BASE: ApiBase;

    fn path(&self) -> Vec<String>;

    fn body(&self) -> Option<Value> {
        None
    }
}

/// JSON object builder that leaves unset optional fields out of the body.
#[derive(Debug, Default)]
pub(crate) struct JsonBody(Map<String, Value>);

impl JsonBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_owned(), value.into());
        self
    }

    pub fn optional<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    pub fn list(self, key: &str, values: &[String]) -> Self {
        if values.is_empty() {
            return self;
        }
        self.field(key, values.to_vec())
    }

    pub fn build(self) -> Option<Value> {
        Some(Value::Object(self.0))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_body_skips_unset_fields() {
        let body = JsonBody::new()
            .field("to", "+15551234567")
            .optional("from", None::<&str>)
            .optional("fast_track", Some(true))
            .list("attachments", &[])
            .build();

        assert_eq!(body, Some(json!({"to": "+15551234567", "fast_track": true})));
    }
}
