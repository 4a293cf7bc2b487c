use std::collections::BTreeMap;
use std::ops::Deref;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Open JSON object for endpoints whose payload has no fixed shape.
pub type JsonObject = Map<String, Value>;

/// Envelope fields attached to every canonical response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub id: String,
    /// Unix milliseconds.
    #[serde(deserialize_with = "crate::domain::timestamp::deserialize")]
    pub timestamp: i64,
    pub api_version: String,
    pub object: String,
}

/// Wrapped response as returned by the API (`{id, timestamp, api_version, object, data}`).
///
/// This is the "raw" form; [`Envelope::into_response`] flattens it into [`Response`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub id: String,
    #[serde(deserialize_with = "crate::domain::timestamp::deserialize")]
    pub timestamp: i64,
    pub api_version: String,
    pub object: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn metadata(&self) -> Metadata {
        Metadata {
            id: self.id.clone(),
            timestamp: self.timestamp,
            api_version: self.api_version.clone(),
            object: self.object.clone(),
        }
    }

    /// Flatten into the canonical [`Response`].
    pub fn into_response(self) -> Response<T> {
        Response {
            metadata: Metadata {
                id: self.id,
                timestamp: self.timestamp,
                api_version: self.api_version,
                object: self.object,
            },
            data: self.data,
        }
    }
}

/// Canonical result of an API call: service data plus envelope [`Metadata`].
///
/// Fields of the service data are reachable through `Deref`, so
/// `response.message_id` works for a `Response<MessageSent>`.
///
/// Serializes flat, as `{...data, "metadata": {...}}`. Data fields are written first
/// and `metadata` last, so a data field literally named `metadata` is replaced by the
/// envelope metadata in the serialized form. The typed `data` keeps its own value.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub data: T,
    pub metadata: Metadata,
}

impl<T> Response<T> {
    pub fn into_data(self) -> T {
        self.data
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Back to the wrapped form the API returns.
    pub fn into_envelope(self) -> Envelope<T> {
        Envelope {
            id: self.metadata.id,
            timestamp: self.metadata.timestamp,
            api_version: self.metadata.api_version,
            object: self.metadata.object,
            data: self.data,
        }
    }
}

impl<T: Serialize> Response<T> {
    /// Flat JSON form of this response.
    ///
    /// Fails when the data does not serialize to a JSON object, since there is no
    /// flat form to merge `metadata` into.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut flat = match serde_json::to_value(&self.data)? {
            Value::Object(map) => map,
            _ => {
                return Err(serde::ser::Error::custom(
                    "response data must serialize to a JSON object",
                ));
            }
        };
        flat.insert("metadata".to_owned(), serde_json::to_value(&self.metadata)?);
        Ok(Value::Object(flat))
    }
}

impl<T> Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T: Serialize> Serialize for Response<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSent {
    /// Use it to refer to this message later (status, reactions, history).
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSent {
    pub email_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCreated {
    pub otp_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpVerified {
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpResent {
    pub resent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingStatus {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub name: String,
    pub value: String,
    pub purpose: String,
}

/// DNS records to configure, grouped by record type.
pub type DnsRecords = BTreeMap<String, Vec<DnsRecord>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub domain: String,
    pub status: String,
    pub id: String,
    pub created_at: i64,
    pub region: String,
    pub sending_allowed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainList {
    pub domains: Vec<DomainSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDetails {
    pub domain: String,
    pub status: String,
    pub id: String,
    pub created_at: i64,
    pub records: Vec<DnsRecords>,
    pub region: String,
    pub sending_allowed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRegistration {
    pub records: Vec<DnsRecords>,
    pub status: String,
    pub region: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDeleted {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberStatus {
    Available,
    GAvailable,
    Leased,
    Unavailable,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseStatus {
    Active,
    Expired,
    Terminated,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingMethod {
    Monthly,
    ServiceContract,
    Goodwill,
    #[serde(other)]
    Unknown,
}

impl BillingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::ServiceContract => "service_contract",
            Self::Goodwill => "goodwill",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub e164: String,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLocation {
    pub country: String,
    pub region: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberCapabilities {
    pub intl_sms: bool,
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberHealth {
    /// `0.0..=1.0`
    pub reputation: f64,
    pub previous_owners: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRequirements {
    pub requirements: Vec<String>,
    pub e911_capable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberPricing {
    pub currency: String,
    pub upfront_fee: f64,
    pub monthly_rate: f64,
}

/// A phone number offered by (or leased from) Contiguity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberInfo {
    /// E.164 number.
    pub id: String,
    pub status: NumberStatus,
    pub number: NumberFormat,
    pub location: NumberLocation,
    pub carrier: String,
    pub capabilities: NumberCapabilities,
    pub health: NumberHealth,
    pub data: NumberRequirements,
    pub created_at: i64,
    pub pricing: NumberPricing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableNumbers {
    pub available: u32,
    pub numbers: Vec<NumberInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingPrice {
    pub currency: String,
    pub monthly_rate: f64,
    pub upfront_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub start: i64,
    pub end: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseBilling {
    pub method: BillingMethod,
    pub price: BillingPrice,
    pub period: BillingPeriod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeasedNumber {
    #[serde(flatten)]
    pub number: NumberInfo,
    pub lease_id: String,
    pub lease_status: LeaseStatus,
    pub billing: LeaseBilling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeasedNumbers {
    pub leased: u32,
    pub numbers: Vec<LeasedNumber>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseCreated {
    pub lease_id: String,
    pub number: String,
    pub status: LeaseStatus,
    pub billing: LeaseBilling,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseTerminated {
    pub lease_id: String,
    pub number_id: String,
    pub status: LeaseStatus,
    pub terminated_at: i64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn metadata() -> Metadata {
        Metadata {
            id: "req_1".to_owned(),
            timestamp: 1,
            api_version: "v1".to_owned(),
            object: "response".to_owned(),
        }
    }

    #[test]
    fn response_serializes_flat_with_metadata() {
        let response = Response {
            data: MessageSent {
                message_id: "m1".to_owned(),
            },
            metadata: metadata(),
        };
        assert_eq!(response.message_id, "m1");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "message_id": "m1",
                "metadata": {"id": "req_1", "timestamp": 1, "api_version": "v1", "object": "response"}
            })
        );
    }

    #[test]
    fn metadata_key_in_data_is_overwritten_when_flattened() {
        let mut data = JsonObject::new();
        data.insert("metadata".to_owned(), json!("from data"));
        data.insert("kept".to_owned(), json!(true));
        let response = Response {
            data,
            metadata: metadata(),
        };

        let flat = response.to_json().unwrap();
        assert_eq!(flat["kept"], json!(true));
        assert_eq!(flat["metadata"]["id"], json!("req_1"));
        assert_eq!(response.data["metadata"], json!("from data"));
    }

    #[test]
    fn non_object_data_has_no_flat_form() {
        let response = Response {
            data: vec!["a", "b"],
            metadata: metadata(),
        };

        let err = response.to_json().unwrap_err();
        assert!(err.to_string().contains("JSON object"), "{err}");
        assert!(serde_json::to_value(&response).is_err());
        assert_eq!(response.into_envelope().data, vec!["a", "b"]);
    }

    #[test]
    fn metadata_accepts_float_timestamp() {
        let parsed: Metadata = serde_json::from_value(json!({
            "id": "req_1",
            "timestamp": 1.0,
            "api_version": "v1",
            "object": "response"
        }))
        .unwrap();
        assert_eq!(parsed, metadata());
    }

    #[test]
    fn envelope_flattens_into_response() {
        let envelope = Envelope {
            id: "req_1".to_owned(),
            timestamp: 1,
            api_version: "v1".to_owned(),
            object: "response".to_owned(),
            data: OtpVerified { verified: true },
        };
        assert_eq!(envelope.metadata(), metadata());

        let response = envelope.into_response();
        assert!(response.verified);
        assert_eq!(response.metadata(), &metadata());
    }

    #[test]
    fn leased_number_flattens_number_info() {
        let json = json!({
            "id": "+15551234567",
            "status": "leased",
            "number": {"e164": "+15551234567", "formatted": "(555) 123-4567"},
            "location": {"country": "US", "region": "CA", "city": "San Francisco"},
            "carrier": "T-Mobile",
            "capabilities": {"intl_sms": false, "channels": ["sms", "mms"]},
            "health": {"reputation": 0.9, "previous_owners": 1},
            "data": {"requirements": [], "e911_capable": true},
            "created_at": 1700000000,
            "pricing": {"currency": "USD", "upfront_fee": 0, "monthly_rate": 5},
            "lease_id": "lease_1",
            "lease_status": "active",
            "billing": {
                "method": "monthly",
                "price": {"currency": "USD", "monthly_rate": 5, "upfront_fee": 0},
                "period": {"start": 1700000000, "end": null}
            }
        });

        let leased: LeasedNumber = serde_json::from_value(json).unwrap();
        assert_eq!(leased.number.status, NumberStatus::Leased);
        assert_eq!(leased.lease_status, LeaseStatus::Active);
        assert_eq!(leased.billing.method, BillingMethod::Monthly);
        assert_eq!(leased.billing.period.end, None);
    }

    #[test]
    fn unknown_enum_values_are_preserved_as_unknown() {
        let status: NumberStatus = serde_json::from_value(json!("reserved")).unwrap();
        assert_eq!(status, NumberStatus::Unknown);
        let status: NumberStatus = serde_json::from_value(json!("g-available")).unwrap();
        assert_eq!(status, NumberStatus::GAvailable);
    }
}
