use serde_json::Value;

use crate::domain::{
    AvailableNumbers, CreateLease, LeaseCreated, LeaseTerminated, LeasedNumber, LeasedNumbers,
    NumberInfo, Validate, ValidationError, check,
};

use super::{ApiBase, Endpoint, JsonBody, Method};

/// `GET /numbers/leases`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct AvailableNumbersQuery;

impl Validate for AvailableNumbersQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Endpoint for AvailableNumbersQuery {
    type Data = AvailableNumbers;

    const METHOD: Method = Method::Get;
    const BASE: ApiBase = ApiBase::Numbers;

    fn path(&self) -> Vec<String> {
        vec!["leases".to_owned()]
    }
}

/// `GET /numbers/{number}`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NumberLookup<'a> {
    pub number: &'a str,
}

impl Validate for NumberLookup<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("number", self.number)
    }
}

impl Endpoint for NumberLookup<'_> {
    type Data = NumberInfo;

    const METHOD: Method = Method::Get;
    const BASE: ApiBase = ApiBase::Numbers;

    fn path(&self) -> Vec<String> {
        vec![self.number.to_owned()]
    }
}

impl Endpoint for CreateLease {
    type Data = LeaseCreated;

    const METHOD: Method = Method::Post;
    const BASE: ApiBase = ApiBase::Numbers;

    fn path(&self) -> Vec<String> {
        vec!["lease".to_owned(), self.number.clone()]
    }

    fn body(&self) -> Option<Value> {
        JsonBody::new()
            .optional("billing_method", self.billing_method.map(|it| it.as_str()))
            .build()
    }
}

/// `GET /numbers/leased`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LeasedNumbersQuery;

impl Validate for LeasedNumbersQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Endpoint for LeasedNumbersQuery {
    type Data = LeasedNumbers;

    const METHOD: Method = Method::Get;
    const BASE: ApiBase = ApiBase::Numbers;

    fn path(&self) -> Vec<String> {
        vec!["leased".to_owned()]
    }
}

/// `GET /numbers/leased/{number}`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LeaseDetails<'a> {
    pub number: &'a str,
}

impl Validate for LeaseDetails<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("number", self.number)
    }
}

impl Endpoint for LeaseDetails<'_> {
    type Data = LeasedNumber;

    const METHOD: Method = Method::Get;
    const BASE: ApiBase = ApiBase::Numbers;

    fn path(&self) -> Vec<String> {
        vec!["leased".to_owned(), self.number.to_owned()]
    }
}

/// `DELETE /numbers/leased/{number}`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TerminateLease<'a> {
    pub number: &'a str,
}

impl Validate for TerminateLease<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        check::e164("number", self.number)
    }
}

impl Endpoint for TerminateLease<'_> {
    type Data = LeaseTerminated;

    const METHOD: Method = Method::Delete;
    const BASE: ApiBase = ApiBase::Numbers;

    fn path(&self) -> Vec<String> {
        vec!["leased".to_owned(), self.number.to_owned()]
    }
}
