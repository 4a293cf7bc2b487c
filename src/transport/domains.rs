use serde_json::Value;

use crate::domain::{
    DomainDeleted, DomainDetails, DomainList, DomainRegistration, RegisterDomain, Validate,
    ValidationError, check,
};

use super::{ApiBase, Endpoint, JsonBody, Method};

/// `GET /domains/`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ListDomains;

impl Validate for ListDomains {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Endpoint for ListDomains {
    type Data = DomainList;

    const METHOD: Method = Method::Get;
    const BASE: ApiBase = ApiBase::Domains;

    fn path(&self) -> Vec<String> {
        vec![String::new()]
    }
}

/// `GET /domains/{domain}`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DomainLookup<'a> {
    pub domain: &'a str,
}

impl Validate for DomainLookup<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        check::non_empty("domain", self.domain)
    }
}

impl Endpoint for DomainLookup<'_> {
    type Data = DomainDetails;

    const METHOD: Method = Method::Get;
    const BASE: ApiBase = ApiBase::Domains;

    fn path(&self) -> Vec<String> {
        vec![self.domain.to_owned()]
    }
}

impl Endpoint for RegisterDomain {
    type Data = DomainRegistration;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Domains;

    fn path(&self) -> Vec<String> {
        vec![self.domain.clone()]
    }

    fn body(&self) -> Option<Value> {
        JsonBody::new()
            .optional("region", self.region.as_deref())
            .optional("custom_return_path", self.custom_return_path.as_deref())
            .build()
    }
}

/// `DELETE /domains/{domain}`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DeleteDomain<'a> {
    pub domain: &'a str,
}

impl Validate for DeleteDomain<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        check::non_empty("domain", self.domain)
    }
}

impl Endpoint for DeleteDomain<'_> {
    type Data = DomainDeleted;

    const METHOD: Method = Method::Delete;
    const BASE: ApiBase = ApiBase::Domains;

    fn path(&self) -> Vec<String> {
        vec![self.domain.to_owned()]
    }
}
