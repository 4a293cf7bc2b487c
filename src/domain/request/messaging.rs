use crate::domain::validation::{Validate, ValidationError, check};

pub const RICH_MESSAGE_MAX_ATTACHMENTS: usize = 10;

/// When to fall back to SMS/RCS if iMessage delivery is not possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImessageFallbackWhen {
    Unsupported,
    Fails,
}

impl ImessageFallbackWhen {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unsupported => "imessage_unsupported",
            Self::Fails => "imessage_fails",
        }
    }
}

/// When to fall back to SMS/RCS if WhatsApp delivery is not possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhatsappFallbackWhen {
    Unsupported,
    Fails,
}

impl WhatsappFallbackWhen {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unsupported => "whatsapp_unsupported",
            Self::Fails => "whatsapp_fails",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback<W> {
    /// Must not be empty.
    pub when: Vec<W>,
    /// Sender number for the fallback message.
    pub from: Option<String>,
}

impl<W> Fallback<W> {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.when.is_empty() {
            return Err(ValidationError::empty("fallback.when"));
        }
        Ok(())
    }
}

fn attachments(values: &[String]) -> Result<(), ValidationError> {
    check::max_items("attachments", values, RICH_MESSAGE_MAX_ATTACHMENTS)?;
    check::each_non_empty("attachments", values)
}

/// Send an iMessage (`POST /send/imessage`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendImessage {
    pub to: String,
    pub message: String,
    pub from: Option<String>,
    pub fallback: Option<Fallback<ImessageFallbackWhen>>,
    pub attachments: Vec<String>,
}

impl SendImessage {
    pub fn new(to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            message: message.into(),
            ..Default::default()
        }
    }
}

impl Validate for SendImessage {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("to", &self.to)?;
        check::non_empty("message", &self.message)?;
        if let Some(fallback) = self.fallback.as_ref() {
            fallback.validate()?;
        }
        attachments(&self.attachments)
    }
}

/// Send a WhatsApp message (`POST /send/whatsapp`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendWhatsapp {
    pub to: String,
    pub message: String,
    pub from: Option<String>,
    pub fallback: Option<Fallback<WhatsappFallbackWhen>>,
    pub attachments: Vec<String>,
    pub fast_track: Option<bool>,
}

impl SendWhatsapp {
    pub fn new(to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            message: message.into(),
            ..Default::default()
        }
    }
}

impl Validate for SendWhatsapp {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("to", &self.to)?;
        check::non_empty("message", &self.message)?;
        if let Some(fallback) = self.fallback.as_ref() {
            fallback.validate()?;
        }
        attachments(&self.attachments)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tapback {
    Love,
    Like,
    Dislike,
    Laugh,
    Emphasize,
    Question,
}

impl Tapback {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Love => "love",
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Laugh => "laugh",
            Self::Emphasize => "emphasize",
            Self::Question => "question",
        }
    }
}

/// Tapback on an iMessage (`POST /send/imessage/reactions`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactImessage {
    pub to: String,
    pub from: String,
    pub tapback: Tapback,
    /// Text of the message being reacted to.
    pub message: String,
}

impl Validate for ReactImessage {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("to", &self.to)?;
        check::non_empty("from", &self.from)?;
        check::non_empty("message", &self.message)
    }
}

/// Mark an iMessage conversation as read (`POST /send/imessage/read`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkRead {
    pub to: String,
    pub from: String,
}

impl Validate for MarkRead {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("to", &self.to)?;
        check::non_empty("from", &self.from)
    }
}

/// React to a WhatsApp message (`POST /send/whatsapp/reactions`).
///
/// A `None` reaction removes the existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactWhatsapp {
    pub to: String,
    pub reaction: Option<String>,
    pub message: Option<String>,
}

impl Validate for ReactWhatsapp {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("to", &self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_requires_condition() {
        let mut request = SendImessage::new("+15551234567", "hi");
        request.fallback = Some(Fallback {
            when: Vec::new(),
            from: None,
        });
        assert_eq!(request.validate().unwrap_err().field(), Some("fallback.when"));

        request.fallback = Some(Fallback {
            when: vec![ImessageFallbackWhen::Unsupported],
            from: Some("+15557654321".to_owned()),
        });
        assert!(request.validate().is_ok());
    }

    #[test]
    fn attachments_are_capped_at_ten() {
        let mut request = SendWhatsapp::new("+15551234567", "hi");
        request.attachments = vec!["https://example.com/a.png".to_owned(); 11];
        assert!(matches!(
            request.validate().unwrap_err(),
            ValidationError::TooMany { max: 10, .. }
        ));
    }

    #[test]
    fn react_requires_e164_recipient() {
        let react = ReactImessage {
            to: "not-a-number".to_owned(),
            from: "+15557654321".to_owned(),
            tapback: Tapback::Love,
            message: "hello".to_owned(),
        };
        assert_eq!(react.validate().unwrap_err().field(), Some("to"));
    }
}
