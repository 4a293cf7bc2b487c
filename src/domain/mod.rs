//! Domain layer: strong types with validation and invariants (no I/O).

mod event;
mod request;
mod response;
pub(crate) mod timestamp;
mod validation;
mod value;

pub use event::{WebhookEvent, WebhookEventType};
pub use request::{
    ConversationHistory, CreateLease, EMAIL_MAX_RECIPIENTS, Fallback, HISTORY_DEFAULT_LIMIT,
    ImessageFallbackWhen, InitiateReverseOtp, MarkRead, NewOtp, REVERSE_OTP_MAX_FACTOR,
    RICH_MESSAGE_MAX_ATTACHMENTS, ReactImessage, ReactText, ReactWhatsapp, ReactionAction,
    RegisterDomain, Reply, ResendOtp, SendEmail, SendImessage, SendText, SendWhatsapp,
    TEXT_MAX_ATTACHMENTS, Tapback, TextReaction, Typing, TypingAction, VerifyOtp,
    WhatsappFallbackWhen,
};
pub use response::{
    AvailableNumbers, BillingMethod, BillingPeriod, BillingPrice, DnsRecord, DnsRecords,
    DomainDeleted, DomainDetails, DomainList, DomainRegistration, DomainSummary, EmailSent,
    Envelope, JsonObject, LeaseBilling, LeaseCreated, LeaseStatus, LeaseTerminated,
    LeasedNumber, LeasedNumbers, MessageSent, Metadata, NumberCapabilities, NumberFormat,
    NumberHealth, NumberInfo, NumberLocation, NumberPricing, NumberRequirements, NumberStatus,
    OtpCreated, OtpResent, OtpVerified, Response, TypingStatus,
};
pub use validation::{ConfigError, Validate, ValidationError};
pub(crate) use validation::check;
pub use value::{ApiToken, PhoneNumber};
