//! Provisioning client: request bodies out, typed results back.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::error::{ProvisioningError, Result};
use crate::phone::{E164Formatter, PhoneFormatter};
use crate::result::{self, BaseResult, QueryNumberData, QueryNumberResult, QueryProfileResult};
use crate::traits::ProvisioningTransport;
use crate::types::{Profile, RemoteMethod, TelephoneNumber};

/// Client for the provisioning server.
///
/// Every call goes through the transport and then through the matching
/// parser in [`crate::result`], so a non-200 return code always surfaces as
/// the corresponding [`ProvisioningError`].
///
/// ```rust,no_run
/// # use pathfinder_provisioning::*;
/// # async fn example(transport: impl ProvisioningTransport) -> Result<()> {
/// let client = ProvisioningClient::new(transport);
/// let result = client.query_profile("TestDFSP").await?;
/// if let Some(data) = result.data {
///     println!("{} has {} records", data.profile.id, data.profile.records().len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ProvisioningClient<T> {
    transport: T,
    formatter: Arc<dyn PhoneFormatter>,
}

/// Builder for [`ProvisioningClient`].
pub struct ProvisioningClientBuilder<T> {
    transport: T,
    formatter: Arc<dyn PhoneFormatter>,
}

impl<T: ProvisioningTransport> ProvisioningClientBuilder<T> {
    fn new(transport: T) -> Self {
        Self {
            transport,
            formatter: Arc::new(E164Formatter),
        }
    }

    /// Formatter used for the `tn` of number query results (default: [`E164Formatter`]).
    #[must_use]
    pub fn phone_formatter(mut self, formatter: impl PhoneFormatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    pub fn build(self) -> ProvisioningClient<T> {
        ProvisioningClient {
            transport: self.transport,
            formatter: self.formatter,
        }
    }
}

/// Outcome of [`ProvisioningClient::batch_query_numbers`].
#[derive(Debug)]
pub struct BatchQueryResult {
    pub success_count: usize,
    pub failed_count: usize,
    /// Entries from every successful query, in request order.
    pub entries: Vec<QueryNumberData>,
    pub failures: Vec<BatchQueryFailure>,
}

#[derive(Debug)]
pub struct BatchQueryFailure {
    pub request_index: usize,
    pub number: TelephoneNumber,
    pub error: ProvisioningError,
}

impl<T: ProvisioningTransport> ProvisioningClient<T> {
    /// Creates a client with the default [`E164Formatter`].
    pub fn new(transport: T) -> Self {
        Self::builder(transport).build()
    }

    pub fn builder(transport: T) -> ProvisioningClientBuilder<T> {
        ProvisioningClientBuilder::new(transport)
    }

    async fn call(&self, method: RemoteMethod, body: Value) -> Result<Value> {
        log::debug!("{} -> {}", method.as_str(), method.operation().as_str());
        self.transport.call(method.as_str(), body).await
    }

    async fn submit(&self, method: RemoteMethod, body: Value) -> Result<BaseResult> {
        let document = self.call(method, body).await?;
        result::base(&document).await
    }

    pub async fn query_profile(&self, profile_id: &str) -> Result<QueryProfileResult> {
        let document = self
            .call(RemoteMethod::QueryDnsProfile, json!({ "ProfileID": profile_id }))
            .await?;
        result::query_profile(&document).await
    }

    pub async fn create_profile(&self, profile: &Profile) -> Result<BaseResult> {
        self.submit(
            RemoteMethod::DefineDnsProfile,
            json!({ "DNSProfileData": profile.to_soap() }),
        )
        .await
    }

    pub async fn update_profile(&self, profile: &Profile) -> Result<BaseResult> {
        self.submit(
            RemoteMethod::UpdateDnsProfile,
            json!({ "DNSProfileData": profile.to_soap() }),
        )
        .await
    }

    pub async fn delete_profile(&self, profile_id: &str) -> Result<BaseResult> {
        self.submit(
            RemoteMethod::DeleteDnsProfile,
            json!({ "ProfileID": profile_id }),
        )
        .await
    }

    pub async fn query_number(&self, number: &TelephoneNumber) -> Result<QueryNumberResult> {
        let document = self
            .call(RemoteMethod::QueryTn, json!({ "TN": number }))
            .await?;
        result::query_number(&document, self.formatter.as_ref()).await
    }

    /// Assign `number` to the profile `profile_id`.
    pub async fn activate_number(
        &self,
        number: &TelephoneNumber,
        profile_id: &str,
    ) -> Result<BaseResult> {
        self.submit(
            RemoteMethod::ActivateTn,
            json!({ "TN": number, "DNSProfileID": profile_id }),
        )
        .await
    }

    pub async fn deactivate_number(&self, number: &TelephoneNumber) -> Result<BaseResult> {
        self.submit(RemoteMethod::DeactivateTn, json!({ "TN": number }))
            .await
    }

    /// Query several numbers concurrently and collect successes and failures.
    ///
    /// A failed query does not abort the others.
    pub async fn batch_query_numbers(&self, numbers: &[TelephoneNumber]) -> BatchQueryResult {
        let futures: Vec<_> = numbers.iter().map(|n| self.query_number(n)).collect();
        let results = futures::future::join_all(futures).await;

        let mut success_count = 0;
        let mut entries = Vec::new();
        let mut failures = Vec::new();

        for (i, (number, result)) in numbers.iter().zip(results).enumerate() {
            match result {
                Ok(found) => {
                    success_count += 1;
                    entries.extend(found.data.unwrap_or_default());
                }
                Err(error) => failures.push(BatchQueryFailure {
                    request_index: i,
                    number: *number,
                    error,
                }),
            }
        }

        BatchQueryResult {
            success_count,
            failed_count: failures.len(),
            entries,
            failures,
        }
    }
}
