//! Inbound webhook handling: signature verification and payload parsing.

mod payload;
mod signature;

use reqwest::header::HeaderMap;

use crate::domain::WebhookEvent;

pub use payload::{MalformedPayload, parse_payload};
pub use signature::{SigningError, sign, verify_at, verify_signature};

/// Request header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "contiguity-signature";

/// Webhook helpers; also available as [`crate::Contiguity::webhook`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Webhook;

impl Webhook {
    pub fn new() -> Self {
        Self
    }

    /// See [`verify_signature`].
    pub fn verify(
        &self,
        raw_body: &[u8],
        signature_header: Option<&str>,
        secret: &str,
        tolerance: Option<u64>,
    ) -> bool {
        verify_signature(raw_body, signature_header, secret, tolerance)
    }

    /// Verifies using the [`SIGNATURE_HEADER`] from a request's headers.
    ///
    /// A header that is not visible ASCII counts as missing.
    pub fn verify_headers(
        &self,
        headers: &HeaderMap,
        raw_body: &[u8],
        secret: &str,
        tolerance: Option<u64>,
    ) -> bool {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok());
        verify_signature(raw_body, signature, secret, tolerance)
    }

    pub fn parse(&self, raw_body: &[u8]) -> Result<WebhookEvent, MalformedPayload> {
        parse_payload(raw_body)
    }
}
