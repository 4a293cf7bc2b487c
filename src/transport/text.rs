use serde_json::Value;

use crate::domain::{
    JsonObject, MessageSent, ReactText, ReactionAction, SendText, Validate, ValidationError,
};

use super::{ApiBase, Endpoint, JsonBody, Method};

impl Endpoint for SendText {
    type Data = MessageSent;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Send;

    fn path(&self) -> Vec<String> {
        vec!["text".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        JsonBody::new()
            .field("to", self.to.as_str())
            .field("message", self.message.as_str())
            .optional("from", self.from.as_deref())
            .list("attachments", &self.attachments)
            .build()
    }
}

/// `POST /send/text/reactions`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextReactionRequest<'a> {
    pub action: ReactionAction,
    pub reaction: &'a ReactText,
}

impl Validate for TextReactionRequest<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        self.reaction.validate()
    }
}

impl Endpoint for TextReactionRequest<'_> {
    type Data = JsonObject;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Send;

    fn path(&self) -> Vec<String> {
        vec!["text".to_owned(), "reactions".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        let reaction = self.reaction;
        JsonBody::new()
            .optional("message_id", reaction.message_id.as_deref())
            .optional("to", reaction.to.as_deref())
            .optional("from", reaction.from.as_deref())
            .optional("message", reaction.message.as_deref())
            .field("reaction", reaction.reaction.as_str())
            .field("action", self.action.as_str())
            .build()
    }
}
