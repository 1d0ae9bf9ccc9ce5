//! # pathfinder-provisioning
//!
//! Typed responses for the PathFinder NAPTR/ENUM provisioning API.
//!
//! The provisioning server answers every call with a loosely typed SOAP
//! document: numbers arrive as strings, and an element that occurs once is a
//! bare object while the same element occurring twice is a sequence. This
//! crate turns such documents (already decoded to `serde_json::Value` in
//! xml2js shape) into typed results and classifies the server's return code.
//!
//! ## Operations
//!
//! | Function | Payload | Result |
//! |----------|---------|--------|
//! | [`result::base`] | kept raw | [`BaseResult`] |
//! | [`result::query_profile`] | `DNSProfileData` | [`QueryProfileResult`] |
//! | [`result::query_number`] | `TNData` (one or many) | [`QueryNumberResult`] |
//!
//! [`result::dispatch`] selects one of them from an [`Operation`].
//!
//! ## Usage
//!
//! ```rust
//! use pathfinder_provisioning::{ProvisioningError, result};
//! use serde_json::json;
//!
//! # async fn example() -> pathfinder_provisioning::Result<()> {
//! let document = json!({
//!     "Envelope": {"Body": {"Response": {
//!         "ReturnCode": {"_": "404"},
//!         "TextMessage": [{"_": "Not Found"}, {"_": "DNS profile does not exist"}]
//!     }}}
//! });
//!
//! match result::query_profile(&document).await {
//!     Ok(found) => println!("{:?}", found.data),
//!     Err(err @ ProvisioningError::NotFound { .. }) => {
//!         println!("{err}: {:?}", err.server_messages());
//!     }
//!     Err(err) => return Err(err),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProvisioningError>`](ProvisioningError).
//! Return code 200 is success; each other code maps onto one variant:
//!
//! | Code | Variant |
//! |------|---------|
//! | 400 | [`ProvisioningError::BadRequest`] |
//! | 401 | [`ProvisioningError::Unauthorized`] |
//! | 404 | [`ProvisioningError::NotFound`] |
//! | 420 | [`ProvisioningError::InvalidValue`] |
//! | 421 | [`ProvisioningError::ValueMissing`] |
//! | 500 | [`ProvisioningError::Server`] |
//! | 503 | [`ProvisioningError::ServiceUnavailable`] |
//! | other | [`ProvisioningError::UnhandledCode`] |
//!
//! Documents without the expected envelope produce
//! [`ProvisioningError::MalformedResponse`].
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and installs no logger.

mod client;
mod error;
mod phone;
pub mod result;
mod traits;
mod types;
mod utils;
mod wire;

// Re-export error types
pub use error::{ErrorKind, ProvisioningError, Result, SUCCESS_CODE};

// Re-export client
pub use client::{
    BatchQueryFailure, BatchQueryResult, ProvisioningClient, ProvisioningClientBuilder,
};

// Re-export collaborator traits
pub use phone::{E164Formatter, PhoneFormatter};
pub use traits::ProvisioningTransport;

// Re-export results
pub use result::{
    BaseResult, ProvisioningResult, QueryNumberData, QueryNumberResult, QueryProfileData,
    QueryProfileResult, ResponseEnvelope,
};

// Re-export types
pub use types::{
    DEFAULT_TIER, Operation, Profile, ProfileOptions, Record, RecordList, Regexp, RemoteMethod,
    SoapProfile, TelephoneNumber,
};

// Re-export wire shapes used by the submission types
pub use wire::{Attributed, IdAttr, NaptrData, OneOrMany, PatternAttr, RegexpData, TtlAttr};

// Re-export utils module
pub use utils::datetime;
