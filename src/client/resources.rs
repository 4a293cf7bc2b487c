//! Resource handles, one per API area.
//!
//! Every method validates its input, then sends exactly one request. Failures are
//! reported as [`ContiguityError`]; successful calls return the normalized [`Response`].

use std::sync::Arc;

use crate::client::ContiguityError;
use crate::client::api::Api;
use crate::domain::{
    AvailableNumbers, ConversationHistory, CreateLease, DomainDeleted, DomainDetails, DomainList,
    DomainRegistration, EmailSent, InitiateReverseOtp, JsonObject, LeaseCreated,
    LeaseTerminated, LeasedNumber, LeasedNumbers, MarkRead, MessageSent, NewOtp, NumberInfo,
    OtpCreated, OtpResent, OtpVerified, ReactImessage, ReactText, ReactWhatsapp, ReactionAction,
    RegisterDomain, Reply, ResendOtp, Response, SendEmail, SendImessage, SendText, SendWhatsapp,
    Typing, TypingStatus, VerifyOtp, WebhookEvent,
};
use crate::transport::{
    ApplyEntitlement, AvailableNumbersQuery, CancelReverseOtp, CheckReverseOtp, DeleteDomain,
    DomainLookup, EntitlementLookup, History, HistoryChannel, ImessageReaction, LeaseDetails,
    LeasedNumbersQuery, ListDomains, ListEntitlements, MessageLookup, NumberLookup,
    RevokeEntitlement, TerminateLease, TextReactionRequest, TypingChannel, TypingIndicator,
    WhatsappReaction, entitlement_from_agreement,
};

type ApiResult<T> = Result<Response<T>, ContiguityError>;

/// SMS/MMS (`/send/text`) and text conversation history.
#[derive(Debug, Clone)]
pub struct Text {
    api: Arc<Api>,
}

impl Text {
    pub(crate) fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    pub async fn send(&self, request: SendText) -> ApiResult<MessageSent> {
        self.api.execute(&request).await
    }

    /// Answer an incoming text: `to` is the event's sender, `from` the number it was sent to.
    pub async fn reply(&self, event: &WebhookEvent, reply: Reply) -> ApiResult<MessageSent> {
        let (to, from) = event.reply_addresses()?;
        let request = SendText {
            to: to.to_owned(),
            message: reply.message,
            from: Some(from.to_owned()),
            attachments: reply.attachments,
        };
        self.send(request).await
    }

    pub async fn react(
        &self,
        action: ReactionAction,
        reaction: ReactText,
    ) -> ApiResult<JsonObject> {
        self.api
            .execute(&TextReactionRequest {
                action,
                reaction: &reaction,
            })
            .await
    }

    /// Look up a single message by id.
    pub async fn get(&self, message_id: &str) -> ApiResult<JsonObject> {
        self.api.execute(&MessageLookup { id: message_id }).await
    }

    pub async fn history(&self, query: ConversationHistory) -> ApiResult<JsonObject> {
        self.api
            .execute(&History {
                channel: HistoryChannel::Text,
                query: &query,
            })
            .await
    }
}

/// Email (`/send/email`).
#[derive(Debug, Clone)]
pub struct Email {
    api: Arc<Api>,
}

impl Email {
    pub(crate) fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    pub async fn send(&self, request: SendEmail) -> ApiResult<EmailSent> {
        self.api.execute(&request).await
    }
}

/// One-time passwords (`/otp`).
#[derive(Debug, Clone)]
pub struct Otp {
    api: Arc<Api>,
    reverse: ReverseOtp,
}

impl Otp {
    pub(crate) fn new(api: Arc<Api>) -> Self {
        Self {
            reverse: ReverseOtp {
                api: Arc::clone(&api),
            },
            api,
        }
    }

    /// Text a new code (`POST /otp/new`).
    #[doc(alias = "new")]
    pub async fn send(&self, request: NewOtp) -> ApiResult<OtpCreated> {
        self.api.execute(&request).await
    }

    pub async fn verify(&self, request: VerifyOtp) -> ApiResult<OtpVerified> {
        self.api.execute(&request).await
    }

    pub async fn resend(&self, request: ResendOtp) -> ApiResult<OtpResent> {
        self.api.execute(&request).await
    }

    pub fn reverse(&self) -> &ReverseOtp {
        &self.reverse
    }
}

/// Reverse OTP: the user texts a code to you (`/otp/reverse`).
#[derive(Debug, Clone)]
pub struct ReverseOtp {
    api: Arc<Api>,
}

impl ReverseOtp {
    pub async fn initiate(&self, request: InitiateReverseOtp) -> ApiResult<JsonObject> {
        self.api.execute(&request).await
    }

    pub async fn verify(&self, otp_id: &str) -> ApiResult<JsonObject> {
        self.api.execute(&CheckReverseOtp { otp_id }).await
    }

    pub async fn cancel(&self, otp_id: &str) -> ApiResult<JsonObject> {
        self.api.execute(&CancelReverseOtp { otp_id }).await
    }
}

/// iMessage (`/send/imessage`) and iMessage conversation history.
#[derive(Debug, Clone)]
pub struct Imessage {
    api: Arc<Api>,
}

impl Imessage {
    pub(crate) fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    pub async fn send(&self, request: SendImessage) -> ApiResult<MessageSent> {
        self.api.execute(&request).await
    }

    /// Answer an incoming iMessage from the number it was sent to.
    pub async fn reply(&self, event: &WebhookEvent, reply: Reply) -> ApiResult<MessageSent> {
        let (to, from) = event.reply_addresses()?;
        let request = SendImessage {
            to: to.to_owned(),
            message: reply.message,
            from: Some(from.to_owned()),
            fallback: None,
            attachments: reply.attachments,
        };
        self.send(request).await
    }

    pub async fn typing(&self, typing: Typing) -> ApiResult<TypingStatus> {
        self.api
            .execute(&TypingIndicator {
                channel: TypingChannel::Imessage,
                typing: &typing,
            })
            .await
    }

    pub async fn react(
        &self,
        action: ReactionAction,
        reaction: ReactImessage,
    ) -> ApiResult<JsonObject> {
        self.api
            .execute(&ImessageReaction {
                action,
                reaction: &reaction,
            })
            .await
    }

    pub async fn read(&self, request: MarkRead) -> ApiResult<JsonObject> {
        self.api.execute(&request).await
    }

    pub async fn get(&self, message_id: &str) -> ApiResult<JsonObject> {
        self.api.execute(&MessageLookup { id: message_id }).await
    }

    pub async fn history(&self, query: ConversationHistory) -> ApiResult<JsonObject> {
        self.api
            .execute(&History {
                channel: HistoryChannel::Imessage,
                query: &query,
            })
            .await
    }
}

/// WhatsApp (`/send/whatsapp`).
#[derive(Debug, Clone)]
pub struct Whatsapp {
    api: Arc<Api>,
}

impl Whatsapp {
    pub(crate) fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    pub async fn send(&self, request: SendWhatsapp) -> ApiResult<MessageSent> {
        self.api.execute(&request).await
    }

    pub async fn typing(&self, typing: Typing) -> ApiResult<TypingStatus> {
        self.api
            .execute(&TypingIndicator {
                channel: TypingChannel::Whatsapp,
                typing: &typing,
            })
            .await
    }

    pub async fn react(
        &self,
        action: ReactionAction,
        reaction: ReactWhatsapp,
    ) -> ApiResult<JsonObject> {
        self.api
            .execute(&WhatsappReaction {
                action,
                reaction: &reaction,
            })
            .await
    }
}

/// Email sending domains (`/domains`).
#[derive(Debug, Clone)]
pub struct Domains {
    api: Arc<Api>,
}

impl Domains {
    pub(crate) fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ApiResult<DomainList> {
        self.api.execute(&ListDomains).await
    }

    pub async fn get(&self, domain: &str) -> ApiResult<DomainDetails> {
        self.api.execute(&DomainLookup { domain }).await
    }

    pub async fn register(&self, request: RegisterDomain) -> ApiResult<DomainRegistration> {
        self.api.execute(&request).await
    }

    pub async fn delete(&self, domain: &str) -> ApiResult<DomainDeleted> {
        self.api.execute(&DeleteDomain { domain }).await
    }
}

/// Phone number leasing (`/numbers`). Every `number` argument must be E.164.
#[derive(Debug, Clone)]
pub struct Lease {
    api: Arc<Api>,
}

impl Lease {
    pub(crate) fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    /// Numbers available to lease.
    pub async fn available(&self) -> ApiResult<AvailableNumbers> {
        self.api.execute(&AvailableNumbersQuery).await
    }

    pub async fn get(&self, number: &str) -> ApiResult<NumberInfo> {
        self.api.execute(&NumberLookup { number }).await
    }

    pub async fn create(&self, request: CreateLease) -> ApiResult<LeaseCreated> {
        self.api.execute(&request).await
    }

    /// Numbers currently leased by your account.
    pub async fn leased(&self) -> ApiResult<LeasedNumbers> {
        self.api.execute(&LeasedNumbersQuery).await
    }

    pub async fn details(&self, number: &str) -> ApiResult<LeasedNumber> {
        self.api.execute(&LeaseDetails { number }).await
    }

    pub async fn terminate(&self, number: &str) -> ApiResult<LeaseTerminated> {
        self.api.execute(&TerminateLease { number }).await
    }
}

/// Account entitlements (`/entitlements`).
#[derive(Debug, Clone)]
pub struct Entitlements {
    api: Arc<Api>,
}

impl Entitlements {
    pub(crate) fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ApiResult<JsonObject> {
        self.api.execute(&ListEntitlements).await
    }

    pub async fn get(&self, name: &str) -> ApiResult<JsonObject> {
        self.api.execute(&EntitlementLookup { name }).await
    }

    pub async fn apply(&self, name: &str) -> ApiResult<JsonObject> {
        self.api.execute(&ApplyEntitlement { name }).await
    }

    pub async fn revoke(&self, name: &str) -> ApiResult<JsonObject> {
        self.api.execute(&RevokeEntitlement { name }).await
    }
}

/// Legal agreements that unlock entitlements.
#[derive(Debug, Clone)]
pub struct Agreements {
    entitlements: Entitlements,
}

impl Agreements {
    pub(crate) fn new(entitlements: Entitlements) -> Self {
        Self { entitlements }
    }

    /// Accept the agreement at `agreement_url` by applying its entitlement.
    pub async fn accept(&self, agreement_url: &str) -> ApiResult<JsonObject> {
        self.entitlements
            .apply(entitlement_from_agreement(agreement_url))
            .await
    }
}
