//! Per-endpoint request schemas. Each type validates itself through [`Validate`](crate::domain::Validate).

mod email;
mod messaging;
mod numbers;
mod otp;
mod text;

pub use email::{EMAIL_MAX_RECIPIENTS, SendEmail};
pub use messaging::{
    Fallback, ImessageFallbackWhen, MarkRead, RICH_MESSAGE_MAX_ATTACHMENTS, ReactImessage,
    ReactWhatsapp, SendImessage, SendWhatsapp, Tapback, WhatsappFallbackWhen,
};
pub use numbers::{CreateLease, RegisterDomain};
pub use otp::{InitiateReverseOtp, NewOtp, REVERSE_OTP_MAX_FACTOR, ResendOtp, VerifyOtp};
pub use text::{
    ConversationHistory, HISTORY_DEFAULT_LIMIT, ReactText, ReactionAction, Reply, SendText,
    TEXT_MAX_ATTACHMENTS, TextReaction, Typing, TypingAction,
};
