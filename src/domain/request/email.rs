use std::collections::BTreeMap;

use crate::domain::validation::{Validate, ValidationError, check};

pub const EMAIL_MAX_RECIPIENTS: usize = 10;

/// Send an email (`POST /send/email`).
///
/// At least one of `html` or `text` must be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendEmail {
    /// One to [`EMAIL_MAX_RECIPIENTS`] addresses.
    pub to: Vec<String>,
    /// Sender name or `Name <address@your-domain>`.
    pub from: String,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub reply_to: Option<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub headers: BTreeMap<String, String>,
}

impl SendEmail {
    pub fn new(
        to: impl Into<String>,
        from: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            to: vec![to.into()],
            from: from.into(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

fn addresses(field: &str, values: &[String]) -> Result<(), ValidationError> {
    check::max_items(field, values, EMAIL_MAX_RECIPIENTS)?;
    for (idx, value) in values.iter().enumerate() {
        check::email(&format!("{field}[{idx}]"), value)?;
    }
    Ok(())
}

impl Validate for SendEmail {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.to.is_empty() {
            return Err(ValidationError::empty("to"));
        }
        addresses("to", &self.to)?;
        check::non_empty("from", &self.from)?;
        check::non_empty("subject", &self.subject)?;

        let has = |body: &Option<String>| body.as_deref().is_some_and(|it| !it.is_empty());
        if !has(&self.html) && !has(&self.text) {
            return Err(ValidationError::MissingBody);
        }

        if let Some(reply_to) = self.reply_to.as_deref() {
            check::email("reply_to", reply_to)?;
        }
        addresses("cc", &self.cc)?;
        addresses("bcc", &self.bcc)?;
        for name in self.headers.keys() {
            check::non_empty("headers", name)?;
        }
        Ok(())
    }
}
