//! Response parsing and return-code classification.
//!
//! [`base`], [`query_profile`] and [`query_number`] are the entry points:
//! each parses a raw response document into its typed result and then
//! resolves to `Ok` for return code 200 or to the [`ProvisioningError`]
//! bound to any other code. Nothing else in the crate turns a return code
//! into control flow.

mod base;
mod query_number;
mod query_profile;

pub use base::BaseResult;
pub use query_number::{QueryNumberData, QueryNumberResult};
pub use query_profile::{QueryProfileData, QueryProfileResult};

use serde_json::Value;

use crate::error::{ProvisioningError, Result};
use crate::phone::PhoneFormatter;
use crate::types::Operation;

/// The envelope fields every parsed result exposes.
pub trait ResponseEnvelope {
    /// Return code reported by the server.
    fn code(&self) -> i64;

    /// `TextMessage` lines, in the order the server sent them.
    fn messages(&self) -> &[String];
}

/// A parsed result of any of the three kinds.
#[derive(Debug, PartialEq, Eq)]
pub enum ProvisioningResult {
    Base(BaseResult),
    QueryProfile(QueryProfileResult),
    QueryNumber(QueryNumberResult),
}

impl ProvisioningResult {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Base(_) => Operation::Base,
            Self::QueryProfile(_) => Operation::QueryProfile,
            Self::QueryNumber(_) => Operation::QueryNumber,
        }
    }
}

impl ResponseEnvelope for ProvisioningResult {
    fn code(&self) -> i64 {
        match self {
            Self::Base(r) => r.code(),
            Self::QueryProfile(r) => r.code(),
            Self::QueryNumber(r) => r.code(),
        }
    }

    fn messages(&self) -> &[String] {
        match self {
            Self::Base(r) => r.messages(),
            Self::QueryProfile(r) => r.messages(),
            Self::QueryNumber(r) => r.messages(),
        }
    }
}

/// Pass a result with code 200 through; turn any other code into its error.
fn classify<R: ResponseEnvelope>(operation: Operation, result: R) -> Result<R> {
    let code = result.code();
    match ProvisioningError::from_return_code(code, result.messages().to_vec()) {
        None => {
            log::debug!("[{}] return code {code}", operation.as_str());
            Ok(result)
        }
        Some(err) => {
            if err.is_expected() {
                log::warn!(
                    "[{}] {err} (code {code}): {:?}",
                    operation.as_str(),
                    err.server_messages()
                );
            } else {
                log::error!(
                    "[{}] {err} (code {code}): {:?}",
                    operation.as_str(),
                    err.server_messages()
                );
            }
            Err(err)
        }
    }
}

/// Parse the envelope of any response and classify its return code.
#[allow(clippy::unused_async)]
pub async fn base(document: &Value) -> Result<BaseResult> {
    classify(Operation::Base, BaseResult::parse(document)?)
}

/// Parse a `queryProfile` response and classify its return code.
#[allow(clippy::unused_async)]
pub async fn query_profile(document: &Value) -> Result<QueryProfileResult> {
    classify(Operation::QueryProfile, QueryProfileResult::parse(document)?)
}

/// Parse a `queryNumber` response, formatting each number with `formatter`,
/// and classify its return code.
#[allow(clippy::unused_async)]
pub async fn query_number(
    document: &Value,
    formatter: &dyn PhoneFormatter,
) -> Result<QueryNumberResult> {
    classify(
        Operation::QueryNumber,
        QueryNumberResult::parse(document, formatter)?,
    )
}

/// Parse `document` as the result kind named by `operation`.
pub async fn dispatch(
    operation: Operation,
    document: &Value,
    formatter: &dyn PhoneFormatter,
) -> Result<ProvisioningResult> {
    match operation {
        Operation::Base => base(document).await.map(ProvisioningResult::Base),
        Operation::QueryProfile => query_profile(document)
            .await
            .map(ProvisioningResult::QueryProfile),
        Operation::QueryNumber => query_number(document, formatter)
            .await
            .map(ProvisioningResult::QueryNumber),
    }
}
