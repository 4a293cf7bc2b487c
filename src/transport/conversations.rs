use crate::domain::{ConversationHistory, JsonObject, Validate, ValidationError, check};

use super::{ApiBase, Endpoint, Method};

/// `GET /conversations/history/message/{id}`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MessageLookup<'a> {
    pub id: &'a str,
}

impl Validate for MessageLookup<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        check::non_empty("id", self.id)
    }
}

impl Endpoint for MessageLookup<'_> {
    type Data = JsonObject;

    const METHOD: Method = Method::Get;
    const BASE: ApiBase = ApiBase::Conversations;

    fn path(&self) -> Vec<String> {
        vec!["history".to_owned(), "message".to_owned(), self.id.to_owned()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HistoryChannel {
    Text,
    Imessage,
}

impl HistoryChannel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Imessage => "imessage",
        }
    }
}

/// `GET /conversations/history/{channel}/{to}/{from}/{limit}`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct History<'a> {
    pub channel: HistoryChannel,
    pub query: &'a ConversationHistory,
}

impl Validate for History<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        self.query.validate()
    }
}

impl Endpoint for History<'_> {
    type Data = JsonObject;

    const METHOD: Method = Method::Get;
    const BASE: ApiBase = ApiBase::Conversations;

    fn path(&self) -> Vec<String> {
        vec![
            "history".to_owned(),
            self.channel.as_str().to_owned(),
            self.query.to.clone(),
            self.query.from.clone(),
            self.query.limit().to_string(),
        ]
    }
}
