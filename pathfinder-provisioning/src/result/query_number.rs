use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::Result;
use crate::phone::PhoneFormatter;
use crate::types::TelephoneNumber;
use crate::utils::datetime::parse_created;
use crate::wire::{OneOrMany, TnPayload, parse_response, payload};

use super::ResponseEnvelope;

/// One number-to-profile assignment from a `queryNumber` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryNumberData {
    pub customer_id: u64,
    /// `DateCreated`, verbatim.
    pub created: Option<String>,
    pub profile_id: String,
    pub tier: u32,
    pub status: String,
    /// The number as produced by the [`PhoneFormatter`].
    pub tn: String,
    /// The number as the server sent it.
    pub number: TelephoneNumber,
}

impl QueryNumberData {
    fn from_payload(payload: TnPayload, formatter: &dyn PhoneFormatter) -> Self {
        let number = payload.tn;
        Self {
            customer_id: payload.customer.attrs.id,
            created: payload.date_created,
            profile_id: payload.profile_id,
            tier: payload.tier,
            status: payload.status,
            tn: formatter.format(number.national_number, number.country_code),
            number,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.as_deref().and_then(parse_created)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryNumberResult {
    pub code: i64,
    pub messages: Vec<String>,
    /// One entry per `TNData`, in source order; `None` when the response had none.
    pub data: Option<Vec<QueryNumberData>>,
}

impl QueryNumberResult {
    pub fn parse(document: &Value, formatter: &dyn PhoneFormatter) -> Result<Self> {
        let response = parse_response(document)?;
        let code = response.code()?;
        let (messages, data) = response.into_parts();
        let data = payload::<OneOrMany<TnPayload>>(data, "TNData", code)?.map(|tn_data| {
            tn_data
                .into_vec()
                .into_iter()
                .map(|entry| QueryNumberData::from_payload(entry, formatter))
                .collect()
        });

        Ok(Self {
            code,
            messages,
            data,
        })
    }
}

impl ResponseEnvelope for QueryNumberResult {
    fn code(&self) -> i64 {
        self.code
    }

    fn messages(&self) -> &[String] {
        &self.messages
    }
}
