use serde_json::Value;

use crate::domain::{
    Fallback, ImessageFallbackWhen, JsonObject, MarkRead, MessageSent, ReactImessage,
    ReactWhatsapp, ReactionAction, SendImessage, SendWhatsapp, Typing, TypingStatus, Validate,
    ValidationError, WhatsappFallbackWhen,
};

use super::{ApiBase, Endpoint, JsonBody, Method};

fn fallback_json<W: Copy>(fallback: &Fallback<W>, name: fn(W) -> &'static str) -> Value {
    let when = fallback.when.iter().map(|it| name(*it)).collect::<Vec<_>>();
    JsonBody::new()
        .field("when", when)
        .optional("from", fallback.from.as_deref())
        .build()
        .unwrap_or(Value::Null)
}

impl Endpoint for SendImessage {
    type Data = MessageSent;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Send;

    fn path(&self) -> Vec<String> {
        vec!["imessage".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        let fallback = self
            .fallback
            .as_ref()
            .map(|fallback| fallback_json(fallback, ImessageFallbackWhen::as_str));
        JsonBody::new()
            .field("to", self.to.as_str())
            .field("message", self.message.as_str())
            .optional("from", self.from.as_deref())
            .optional("fallback", fallback)
            .list("attachments", &self.attachments)
            .build()
    }
}

impl Endpoint for SendWhatsapp {
    type Data = MessageSent;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Send;

    fn path(&self) -> Vec<String> {
        vec!["whatsapp".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        let fallback = self
            .fallback
            .as_ref()
            .map(|fallback| fallback_json(fallback, WhatsappFallbackWhen::as_str));
        JsonBody::new()
            .field("to", self.to.as_str())
            .field("message", self.message.as_str())
            .optional("from", self.from.as_deref())
            .optional("fallback", fallback)
            .list("attachments", &self.attachments)
            .optional("fast_track", self.fast_track)
            .build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypingChannel {
    Imessage,
    Whatsapp,
}

impl TypingChannel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Imessage => "imessage",
            Self::Whatsapp => "whatsapp",
        }
    }
}

/// `POST /send/{channel}/typing`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TypingIndicator<'a> {
    pub channel: TypingChannel,
    pub typing: &'a Typing,
}

impl Validate for TypingIndicator<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        self.typing.validate()
    }
}

impl Endpoint for TypingIndicator<'_> {
    type Data = TypingStatus;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Send;

    fn path(&self) -> Vec<String> {
        vec![self.channel.as_str().to_owned(), "typing".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        JsonBody::new()
            .field("to", self.typing.to.as_str())
            .field("action", self.typing.action.as_str())
            .optional("from", self.typing.from.as_deref())
            .build()
    }
}

/// `POST /send/imessage/reactions`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ImessageReaction<'a> {
    pub action: ReactionAction,
    pub reaction: &'a ReactImessage,
}

impl Validate for ImessageReaction<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        self.reaction.validate()
    }
}

impl Endpoint for ImessageReaction<'_> {
    type Data = JsonObject;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Send;

    fn path(&self) -> Vec<String> {
        vec!["imessage".to_owned(), "reactions".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        JsonBody::new()
            .field("to", self.reaction.to.as_str())
            .field("from", self.reaction.from.as_str())
            .field("tapback", self.reaction.tapback.as_str())
            .field("message", self.reaction.message.as_str())
            .field("action", self.action.as_str())
            .build()
    }
}

impl Endpoint for MarkRead {
    type Data = JsonObject;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Send;

    fn path(&self) -> Vec<String> {
        vec!["imessage".to_owned(), "read".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        JsonBody::new()
            .field("to", self.to.as_str())
            .field("from", self.from.as_str())
            .build()
    }
}

/// `POST /send/whatsapp/reactions`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WhatsappReaction<'a> {
    pub action: ReactionAction,
    pub reaction: &'a ReactWhatsapp,
}

impl Validate for WhatsappReaction<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        self.reaction.validate()
    }
}

impl Endpoint for WhatsappReaction<'_> {
    type Data = JsonObject;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Send;

    fn path(&self) -> Vec<String> {
        vec!["whatsapp".to_owned(), "reactions".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        // An explicit null reaction clears the existing one.
        let reaction = self
            .reaction
            .reaction
            .as_deref()
            .map_or(Value::Null, Value::from);
        JsonBody::new()
            .field("to", self.reaction.to.as_str())
            .field("reaction", reaction)
            .optional("message", self.reaction.message.as_deref())
            .field("action", self.action.as_str())
            .build()
    }
}
