use serde_json::Value;

use crate::domain::{
    InitiateReverseOtp, JsonObject, NewOtp, OtpCreated, OtpResent, OtpVerified, ResendOtp,
    Validate, ValidationError, VerifyOtp, check,
};

use super::{ApiBase, Endpoint, JsonBody, Method};

impl Endpoint for NewOtp {
    type Data = OtpCreated;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Otp;

    fn path(&self) -> Vec<String> {
        vec!["new".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        JsonBody::new()
            .field("to", self.to.as_str())
            .field("language", self.language.as_str())
            .field("name", self.name.as_str())
            .build()
    }
}

impl Endpoint for VerifyOtp {
    type Data = OtpVerified;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Otp;

    fn path(&self) -> Vec<String> {
        vec!["verify".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        JsonBody::new()
            .field("otp_id", self.otp_id.as_str())
            .field("otp", self.otp.as_str())
            .build()
    }
}

impl Endpoint for ResendOtp {
    type Data = OtpResent;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Otp;

    fn path(&self) -> Vec<String> {
        vec!["resend".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        JsonBody::new().field("otp_id", self.otp_id.as_str()).build()
    }
}

impl Endpoint for InitiateReverseOtp {
    type Data = JsonObject;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Otp;

    fn path(&self) -> Vec<String> {
        vec!["reverse".to_owned(), "initiate".to_owned()]
    }

    fn body(&self) -> Option<Value> {
        JsonBody::new()
            .field("number", self.number.as_str())
            .optional("factor", self.factor.as_deref())
            .optional("to", self.to.as_deref())
            .optional("language", self.language.as_deref())
            .optional("success_url", self.success_url.as_deref())
            .build()
    }
}

/// `GET /otp/reverse/verify/{otp_id}`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CheckReverseOtp<'a> {
    pub otp_id: &'a str,
}

impl Validate for CheckReverseOtp<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        check::non_empty("otp_id", self.otp_id)
    }
}

impl Endpoint for CheckReverseOtp<'_> {
    type Data = JsonObject;

    const METHOD: Method = Method::Get;
    const BASE: ApiBase = ApiBase::Otp;

    fn path(&self) -> Vec<String> {
        vec![
            "reverse".to_owned(),
            "verify".to_owned(),
            self.otp_id.to_owned(),
        ]
    }
}

/// `POST /otp/reverse/cancel/{otp_id}`, sent without a body.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CancelReverseOtp<'a> {
    pub otp_id: &'a str,
}

impl Validate for CancelReverseOtp<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        check::non_empty("otp_id", self.otp_id)
    }
}

impl Endpoint for CancelReverseOtp<'_> {
    type Data = JsonObject;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Otp;

    fn path(&self) -> Vec<String> {
        vec![
            "reverse".to_owned(),
            "cancel".to_owned(),
            self.otp_id.to_owned(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_otp_sends_all_fields() {
        let request = NewOtp::new("+15551234567", "en", "Acme");

        assert_eq!(request.path(), ["new"]);
        assert_eq!(
            request.body(),
            Some(json!({"to": "+15551234567", "language": "en", "name": "Acme"}))
        );
    }

    #[test]
    fn reverse_initiate_omits_unset_options() {
        let mut request = InitiateReverseOtp::new("+15551234567");
        request.success_url = Some("https://acme.dev/done".to_owned());

        assert_eq!(
            request.body(),
            Some(json!({"number": "+15551234567", "success_url": "https://acme.dev/done"}))
        );
    }

    #[test]
    fn reverse_lookups_put_the_id_in_the_path() {
        let check = CheckReverseOtp { otp_id: "otp_9" };
        assert_eq!(check.path(), ["reverse", "verify", "otp_9"]);
        assert_eq!(check.body(), None);

        let cancel = CancelReverseOtp { otp_id: "" };
        assert_eq!(cancel.validate().unwrap_err().field(), Some("otp_id"));
    }
}
