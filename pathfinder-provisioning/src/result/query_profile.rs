use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::Result;
use crate::types::{Profile, ProfileOptions, Record, RecordList};
use crate::utils::datetime::parse_created;
use crate::wire::{ProfilePayload, many, parse_response, payload};

use super::ResponseEnvelope;

/// Payload of a successful `queryProfile` call.
#[derive(Debug, PartialEq, Eq)]
pub struct QueryProfileData {
    pub customer_id: u64,
    pub is_in_use: bool,
    /// `DateCreated`, verbatim.
    pub created: Option<String>,
    pub profile: Profile,
}

impl QueryProfileData {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.as_deref().and_then(parse_created)
    }
}

impl From<ProfilePayload> for QueryProfileData {
    fn from(payload: ProfilePayload) -> Self {
        let records: Vec<Record> = many(payload.naptr).into_iter().map(Record::from).collect();

        let mut options =
            ProfileOptions::new(payload.profile_id).records(RecordList::from(records));
        options.tier = payload.tier;

        Self {
            customer_id: payload.customer.attrs.id,
            is_in_use: is_true(payload.is_in_use.as_deref()),
            created: payload.date_created,
            profile: Profile::new(options),
        }
    }
}

/// `"True"` in any case; absent or anything else is false.
fn is_true(flag: Option<&str>) -> bool {
    flag.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

#[derive(Debug, PartialEq, Eq)]
pub struct QueryProfileResult {
    pub code: i64,
    pub messages: Vec<String>,
    /// `None` when the response carried no `DNSProfileData`, as on error codes.
    pub data: Option<QueryProfileData>,
}

impl QueryProfileResult {
    pub fn parse(document: &Value) -> Result<Self> {
        let response = parse_response(document)?;
        let code = response.code()?;
        let (messages, data) = response.into_parts();
        let data = payload::<ProfilePayload>(data, "DNSProfileData", code)?
            .map(QueryProfileData::from);

        Ok(Self {
            code,
            messages,
            data,
        })
    }
}

impl ResponseEnvelope for QueryProfileResult {
    fn code(&self) -> i64 {
        self.code
    }

    fn messages(&self) -> &[String] {
        &self.messages
    }
}
