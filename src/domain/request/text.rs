use crate::domain::validation::{Validate, ValidationError, check};

pub const TEXT_MAX_ATTACHMENTS: usize = 3;

/// Send an SMS/MMS (`POST /send/text`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendText {
    /// Recipient in E.164 format.
    pub to: String,
    pub message: String,
    /// One of your leased numbers; a random one is used when absent.
    pub from: Option<String>,
    /// URLs or base64 data; makes the message an MMS.
    pub attachments: Vec<String>,
}

impl SendText {
    pub fn new(to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn from_number(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachments.push(attachment.into());
        self
    }
}

impl Validate for SendText {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("to", &self.to)?;
        check::non_empty("message", &self.message)?;
        check::max_items("attachments", &self.attachments, TEXT_MAX_ATTACHMENTS)?;
        check::each_non_empty("attachments", &self.attachments)
    }
}

/// Body of a reply to an incoming message; `to`/`from` come from the webhook event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    pub attachments: Vec<String>,
}

impl Reply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attachments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionAction {
    Add,
    Remove,
}

impl ReactionAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextReaction {
    Love,
    ThumbsUp,
    ThumbsDown,
    Haha,
    Emphasized,
    Questioned,
}

impl TextReaction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Love => "love",
            Self::ThumbsUp => "thumbsup",
            Self::ThumbsDown => "thumbsdown",
            Self::Haha => "haha",
            Self::Emphasized => "emphasized",
            Self::Questioned => "questioned",
        }
    }
}

/// React to a text message (`POST /send/text/reactions`).
///
/// Identify the target either by `message_id` or by `to`/`from`/`message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactText {
    pub reaction: TextReaction,
    pub message_id: Option<String>,
    pub to: Option<String>,
    pub from: Option<String>,
    pub message: Option<String>,
}

impl ReactText {
    pub fn to_message(message_id: impl Into<String>, reaction: TextReaction) -> Self {
        Self {
            reaction,
            message_id: Some(message_id.into()),
            to: None,
            from: None,
            message: None,
        }
    }
}

impl Validate for ReactText {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(message_id) = self.message_id.as_deref() {
            check::non_empty("message_id", message_id)?;
        }
        if let Some(to) = self.to.as_deref() {
            check::e164("to", to)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypingAction {
    Start,
    Stop,
}

impl TypingAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

/// Show or hide the typing indicator (iMessage and WhatsApp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typing {
    pub to: String,
    pub action: TypingAction,
    pub from: Option<String>,
}

impl Typing {
    pub fn new(to: impl Into<String>, action: TypingAction) -> Self {
        Self {
            to: to.into(),
            action,
            from: None,
        }
    }
}

impl Validate for Typing {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("to", &self.to)
    }
}

pub const HISTORY_DEFAULT_LIMIT: u32 = 20;

/// Conversation history between two numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationHistory {
    pub to: String,
    pub from: String,
    /// Defaults to [`HISTORY_DEFAULT_LIMIT`].
    pub limit: Option<u32>,
}

impl ConversationHistory {
    pub fn new(to: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
            limit: None,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(HISTORY_DEFAULT_LIMIT)
    }
}

impl Validate for ConversationHistory {
    fn validate(&self) -> Result<(), ValidationError> {
        check::non_empty("to", &self.to)?;
        check::non_empty("from", &self.from)
    }
}
