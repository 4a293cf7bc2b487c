use std::fmt;

/// Caller-supplied parameters rejected before any request is sent.
///
/// Every variant names the offending field using a dotted/indexed path
/// (`to`, `attachments[2]`, `fallback.when`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: String },
    InvalidPhoneNumber { field: String, input: String },
    InvalidEmail { field: String, input: String },
    InvalidUrl { field: String, input: String },
    TooMany { field: String, max: usize, actual: usize },
    TooLong { field: String, max: usize, actual: usize },
    InvalidValue { field: String, expected: &'static str },
    MissingBody,
    MissingReplyAddress { field: &'static str },
}

impl ValidationError {
    pub(crate) fn empty(field: impl Into<String>) -> Self {
        Self::Empty {
            field: field.into(),
        }
    }

    /// Path of the violated field, if the error concerns a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Empty { field }
            | Self::InvalidPhoneNumber { field, .. }
            | Self::InvalidEmail { field, .. }
            | Self::InvalidUrl { field, .. }
            | Self::TooMany { field, .. }
            | Self::TooLong { field, .. }
            | Self::InvalidValue { field, .. } => Some(field.as_str()),
            Self::MissingReplyAddress { field } => Some(*field),
            Self::MissingBody => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { field, input } => {
                write!(f, "{field}: phone number must be in E.164 format: {input}")
            }
            Self::InvalidEmail { field, input } => {
                write!(f, "{field}: must be a valid email address: {input}")
            }
            Self::InvalidUrl { field, input } => write!(f, "{field}: invalid URL: {input}"),
            Self::TooMany { field, max, actual } => {
                write!(f, "{field}: too many values: {actual} (max {max})")
            }
            Self::TooLong { field, max, actual } => {
                write!(f, "{field}: too long: {actual} characters (max {max})")
            }
            Self::InvalidValue { field, expected } => write!(f, "{field}: expected {expected}"),
            Self::MissingBody => write!(f, "either html or text must be provided"),
            Self::MissingReplyAddress { field } => {
                write!(f, "webhook event {field} is required to reply")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Per-endpoint request schema, checked before anything is sent.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Client misconfiguration detected while constructing [`crate::Contiguity`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Contiguity token required. Pass it to the constructor or set CONTIGUITY_API_KEY or CONTIGUITY_TOKEN"
    )]
    MissingToken,

    #[error("Contiguity API token cannot be empty")]
    EmptyToken,

    #[error(
        "Contiguity tokens begin with \"contiguity_sk_\"; are you sure you entered the correct token?"
    )]
    InvalidPrefix,

    #[error(
        "API v1 keys cannot be used with API v2. Generate a new token at https://console.contiguity.com/dashboard/tokens"
    )]
    LegacyToken,

    #[error("invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("failed to build HTTP client: {message}")]
    HttpClient { message: String },
}

impl ConfigError {
    /// Machine-readable status for this error.
    pub fn status(&self) -> &'static str {
        match self {
            Self::MissingToken | Self::InvalidPrefix => "invalid_token",
            Self::EmptyToken => "empty_token",
            Self::LegacyToken => "old_token",
            Self::InvalidBaseUrl { .. } | Self::HttpClient { .. } => "invalid_config",
        }
    }
}

/// Checks applied by the per-endpoint request schemas.
pub(crate) mod check {
    use super::ValidationError;

    pub fn non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::empty(field));
        }
        Ok(())
    }

    /// `^\+[1-9]\d{1,14}$`
    pub fn e164(field: &str, value: &str) -> Result<(), ValidationError> {
        let valid = value
            .strip_prefix('+')
            .filter(|digits| (2..=15).contains(&digits.len()))
            .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
            .is_some_and(|digits| !digits.starts_with('0'));
        if !valid {
            return Err(ValidationError::InvalidPhoneNumber {
                field: field.to_owned(),
                input: value.to_owned(),
            });
        }
        Ok(())
    }

    pub fn email(field: &str, value: &str) -> Result<(), ValidationError> {
        let invalid = || ValidationError::InvalidEmail {
            field: field.to_owned(),
            input: value.to_owned(),
        };
        let (local, domain) = value.rsplit_once('@').ok_or_else(invalid)?;
        if local.is_empty()
            || local.contains('@')
            || value.chars().any(char::is_whitespace)
            || domain.starts_with('.')
            || domain.ends_with('.')
            || !domain.contains('.')
        {
            return Err(invalid());
        }
        Ok(())
    }

    pub fn url(field: &str, value: &str) -> Result<(), ValidationError> {
        url::Url::parse(value).map_err(|_| ValidationError::InvalidUrl {
            field: field.to_owned(),
            input: value.to_owned(),
        })?;
        Ok(())
    }

    pub fn max_items<T>(field: &str, values: &[T], max: usize) -> Result<(), ValidationError> {
        if values.len() > max {
            return Err(ValidationError::TooMany {
                field: field.to_owned(),
                max,
                actual: values.len(),
            });
        }
        Ok(())
    }

    pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
        let actual = value.chars().count();
        if actual > max {
            return Err(ValidationError::TooLong {
                field: field.to_owned(),
                max,
                actual,
            });
        }
        Ok(())
    }

    pub fn each_non_empty(field: &str, values: &[String]) -> Result<(), ValidationError> {
        for (idx, value) in values.iter().enumerate() {
            non_empty(&format!("{field}[{idx}]"), value)?;
        }
        Ok(())
    }
}
