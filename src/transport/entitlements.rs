use crate::domain::{JsonObject, Validate, ValidationError, check};

use super::{ApiBase, Endpoint, Method};

const AGREEMENT_URL_PREFIX: &str = "https://api.contiguity.com/entitlements/";

/// Entitlement name referenced by an agreement URL; other input is taken as the name itself.
pub(crate) fn entitlement_from_agreement(agreement_url: &str) -> &str {
    agreement_url
        .strip_prefix(AGREEMENT_URL_PREFIX)
        .unwrap_or(agreement_url)
}

/// `GET /entitlements/`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ListEntitlements;

impl Validate for ListEntitlements {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Endpoint for ListEntitlements {
    type Data = JsonObject;

    const METHOD: Method = Method::Get;
    const BASE: ApiBase = ApiBase::Entitlements;

    fn path(&self) -> Vec<String> {
        vec![String::new()]
    }
}

fn entitlement_name(name: &str) -> Result<(), ValidationError> {
    check::non_empty("name", name)
}

/// `GET /entitlements/{name}`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EntitlementLookup<'a> {
    pub name: &'a str,
}

impl Validate for EntitlementLookup<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        entitlement_name(self.name)
    }
}

impl Endpoint for EntitlementLookup<'_> {
    type Data = JsonObject;

    const METHOD: Method = Method::Get;
    const BASE: ApiBase = ApiBase::Entitlements;

    fn path(&self) -> Vec<String> {
        vec![self.name.to_owned()]
    }
}

/// `POST /entitlements/{name}`, sent without a body.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ApplyEntitlement<'a> {
    pub name: &'a str,
}

impl Validate for ApplyEntitlement<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        entitlement_name(self.name)
    }
}

impl Endpoint for ApplyEntitlement<'_> {
    type Data = JsonObject;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Entitlements;

    fn path(&self) -> Vec<String> {
        vec![self.name.to_owned()]
    }
}

/// `DELETE /entitlements/{name}`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RevokeEntitlement<'a> {
    pub name: &'a str,
}

impl Validate for RevokeEntitlement<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        entitlement_name(self.name)
    }
}

impl Endpoint for RevokeEntitlement<'_> {
    type Data = JsonObject;

    const METHOD: Method = Method::Delete;
    const BASE: ApiBase = ApiBase::Entitlements;

    fn path(&self) -> Vec<String> {
        vec![self.name.to_owned()]
    }
}
