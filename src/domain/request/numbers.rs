use crate::domain::response::BillingMethod;
use crate::domain::validation::{Validate, ValidationError, check};

/// Register a sending domain (`POST /domains/{domain}`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterDomain {
    pub domain: String,
    /// Defaults to `us-east-1` on the server.
    pub region: Option<String>,
    pub custom_return_path: Option<String>,
}

impl RegisterDomain {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }
}

impl Validate for RegisterDomain {
    fn validate(&self) -> Result<(), ValidationError> {
        check::non_empty("domain", &self.domain)?;
        if let Some(region) = self.region.as_deref() {
            check::non_empty("region", region)?;
        }
        Ok(())
    }
}

/// Lease a phone number (`POST /numbers/lease/{number}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLease {
    /// Number to lease, E.164.
    pub number: String,
    /// `monthly` on the server when absent.
    pub billing_method: Option<BillingMethod>,
}

impl CreateLease {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            billing_method: None,
        }
    }
}

impl Validate for CreateLease {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("number", &self.number)?;
        match self.billing_method {
            None | Some(BillingMethod::Monthly | BillingMethod::ServiceContract) => Ok(()),
            Some(_) => Err(ValidationError::InvalidValue {
                field: "billing_method".to_owned(),
                expected: "monthly or service_contract",
            }),
        }
    }
}
