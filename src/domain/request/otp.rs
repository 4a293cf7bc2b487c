use crate::domain::validation::{Validate, ValidationError, check};

/// Maximum length of a reverse-OTP `factor`.
pub const REVERSE_OTP_MAX_FACTOR: usize = 16;

/// Send a new one-time password (`POST /otp/new`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOtp {
    /// Recipient in E.164 format.
    pub to: String,
    /// Language of the message, e.g. `en`.
    pub language: String,
    /// App name, used as "Your [name] code is ...".
    pub name: String,
}

impl NewOtp {
    pub fn new(
        to: impl Into<String>,
        language: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            language: language.into(),
            name: name.into(),
        }
    }
}

impl Validate for NewOtp {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("to", &self.to)?;
        check::non_empty("language", &self.language)?;
        check::non_empty("name", &self.name)
    }
}

/// Check a code the user typed in (`POST /otp/verify`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOtp {
    pub otp_id: String,
    pub otp: String,
}

impl VerifyOtp {
    pub fn new(otp_id: impl Into<String>, otp: impl Into<String>) -> Self {
        Self {
            otp_id: otp_id.into(),
            otp: otp.into(),
        }
    }
}

impl Validate for VerifyOtp {
    fn validate(&self) -> Result<(), ValidationError> {
        check::non_empty("otp_id", &self.otp_id)?;
        check::non_empty("otp", &self.otp)
    }
}

/// Resend an existing OTP (`POST /otp/resend`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendOtp {
    pub otp_id: String,
}

impl ResendOtp {
    pub fn new(otp_id: impl Into<String>) -> Self {
        Self {
            otp_id: otp_id.into(),
        }
    }
}

impl Validate for ResendOtp {
    fn validate(&self) -> Result<(), ValidationError> {
        check::non_empty("otp_id", &self.otp_id)
    }
}

/// Start a reverse OTP, where the user texts a code to you
/// (`POST /otp/reverse/initiate`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitiateReverseOtp {
    /// The user's number, E.164.
    pub number: String,
    pub factor: Option<String>,
    pub to: Option<String>,
    pub language: Option<String>,
    /// Where the user lands after verifying.
    pub success_url: Option<String>,
}

impl InitiateReverseOtp {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            ..Default::default()
        }
    }
}

impl Validate for InitiateReverseOtp {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("number", &self.number)?;
        if let Some(factor) = self.factor.as_deref() {
            check::max_chars("factor", factor, REVERSE_OTP_MAX_FACTOR)?;
        }
        if let Some(success_url) = self.success_url.as_deref() {
            check::url("success_url", success_url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_otp_checks_all_fields() {
        assert!(NewOtp::new("+15551234567", "en", "Acme").validate().is_ok());
        assert_eq!(
            NewOtp::new("+15551234567", "", "Acme")
                .validate()
                .unwrap_err()
                .field(),
            Some("language")
        );
        assert_eq!(
            NewOtp::new("555", "en", "Acme").validate().unwrap_err().field(),
            Some("to")
        );
    }

    #[test]
    fn verify_and_resend_require_ids() {
        assert!(VerifyOtp::new("otp_1", "123456").validate().is_ok());
        assert!(VerifyOtp::new("otp_1", "").validate().is_err());
        assert!(ResendOtp::new(" ").validate().is_err());
    }

    #[test]
    fn reverse_otp_checks_factor_and_url() {
        let mut request = InitiateReverseOtp::new("+15551234567");
        assert!(request.validate().is_ok());

        request.factor = Some("x".repeat(17));
        assert_eq!(request.validate().unwrap_err().field(), Some("factor"));

        request.factor = None;
        request.success_url = Some("not a url".to_owned());
        assert_eq!(request.validate().unwrap_err().field(), Some("success_url"));

        request.success_url = Some("https://acme.dev/verified".to_owned());
        assert!(request.validate().is_ok());
    }
}
