//! Typed Rust client for the Contiguity communications API.
//!
//! The crate is split into a domain layer of validated request/response types, a
//! transport layer for wire-format details (endpoint routes, JSON bodies, response
//! envelopes), a client layer orchestrating requests, and webhook helpers for inbound
//! deliveries.
//!
//! ```rust,no_run
//! use contiguity::{Contiguity, SendText};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), contiguity::ContiguityError> {
//!     let client = Contiguity::from_env()?;
//!     let sent = client
//!         .text()
//!         .send(SendText::new("+15555555555", "hello from Rust"))
//!         .await?;
//!     println!("{} ({})", sent.message_id, sent.metadata.id);
//!     Ok(())
//! }
//! ```
//!
//! Verifying and parsing a webhook:
//!
//! ```rust
//! use contiguity::webhook::{parse_payload, sign, verify_signature};
//!
//! let body = br#"{"id":"evt_1","type":"text.incoming.sms","timestamp":1700000000,"data":{}}"#;
//! let header = sign(body, "whsec_example", 1_700_000_000).unwrap();
//! assert!(verify_signature(body, Some(&header), "whsec_example", None));
//! assert_eq!(parse_payload(body).unwrap().id, "evt_1");
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;
pub mod webhook;

pub use client::{
    Contiguity, ContiguityBuilder, ContiguityError, HttpRequest, HttpResponse, HttpTransport,
    ReqwestTransport,
};
pub use domain::{
    ApiToken, ConfigError, ConversationHistory, CreateLease, Envelope, InitiateReverseOtp,
    JsonObject, MarkRead, Metadata, NewOtp, PhoneNumber, ReactImessage, ReactText,
    ReactWhatsapp, ReactionAction, RegisterDomain, Reply, ResendOtp, Response, SendEmail,
    SendImessage, SendText, SendWhatsapp, Typing, TypingAction, ValidationError, VerifyOtp,
    WebhookEvent, WebhookEventType,
};
pub use transport::{
    ApiStatus, ErrorEnvelope, Method, ResponseFormatError, decode_error_envelope, normalize,
};
pub use webhook::{MalformedPayload, Webhook};
