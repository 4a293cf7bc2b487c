use std::fmt;

use phonenumber::country;

use crate::domain::validation::{ConfigError, ValidationError, check};

#[derive(Clone, PartialEq, Eq, Hash)]
/// Contiguity secret API token.
///
/// Invariant: non-empty after trimming and starts with [`ApiToken::PREFIX`].
/// The `Debug` representation never contains the secret.
pub struct ApiToken(String);

impl ApiToken {
    /// Prefix carried by every API v2 token.
    pub const PREFIX: &'static str = "contiguity_sk_";

    /// Create a validated [`ApiToken`].
    ///
    /// All-uppercase values without the prefix are API v1 keys and are reported as
    /// [`ConfigError::LegacyToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        if !trimmed.starts_with(Self::PREFIX) {
            if trimmed.to_uppercase() == trimmed {
                return Err(ConfigError::LegacyToken);
            }
            return Err(ConfigError::InvalidPrefix);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&"[redacted]").finish()
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Every phone field sent to Contiguity must be E.164; use this type to normalize
/// free-form input (`(555) 123-4567` with a default region) before building a request.
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::empty("phone number"));
        }

        let parsed = phonenumber::parse(default_region, &raw).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                field: "phone number".to_owned(),
                input: raw.clone(),
            }
        })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        check::e164("phone number", &e164)?;

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.e164
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_token_trims_and_checks_prefix() {
        let token = ApiToken::new("  contiguity_sk_abc123 ").unwrap();
        assert_eq!(token.as_str(), "contiguity_sk_abc123");

        assert_eq!(ApiToken::new("   ").unwrap_err(), ConfigError::EmptyToken);
        assert_eq!(
            ApiToken::new("sk_live_abc").unwrap_err(),
            ConfigError::InvalidPrefix
        );
    }

    #[test]
    fn api_token_detects_legacy_uppercase_keys() {
        assert_eq!(
            ApiToken::new("ABCDEF0123456789").unwrap_err(),
            ConfigError::LegacyToken
        );
    }

    #[test]
    fn api_token_debug_is_redacted() {
        let token = ApiToken::new("contiguity_sk_secret").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(None, "+15551234567").unwrap();
        let p2 = PhoneNumber::parse(None, "+1 555 123 4567").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+15551234567");
        assert_eq!(p2.raw(), "+1 555 123 4567");

        let as_string: String = p2.into();
        assert_eq!(as_string, "+15551234567");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
        assert!(PhoneNumber::parse(None, "  ").is_err());
    }

    #[test]
    fn phone_number_uses_default_region() {
        let pn = PhoneNumber::parse(Some(country::Id::US), "(555) 123-4567").unwrap();
        assert_eq!(pn.e164(), "+15551234567");
    }
}
