//! Shared test transport, formatter and response fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use pathfinder_provisioning::{PhoneFormatter, ProvisioningError, ProvisioningTransport, Result};
use serde_json::{Value, json};

/// Assert that an `Option` is `Some` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

// ============ Transport ============

/// Transport answering from canned documents keyed by remote method name.
///
/// Methods without a canned document fail with a transport error.
#[derive(Default)]
pub struct MockTransport {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, method: &str, document: Value) -> Self {
        self.responses.insert(method.to_string(), document);
        self
    }

    /// Every `(method, body)` sent so far.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProvisioningTransport for MockTransport {
    async fn call(&self, method: &str, body: Value) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), body.clone()));
        self.responses
            .get(method)
            .cloned()
            .ok_or_else(|| ProvisioningError::Transport {
                detail: format!("no canned response for {method}"),
            })
    }
}

/// Transport that picks the canned document from the `TN.Base` of the request.
#[derive(Default)]
pub struct NumberTransport {
    responses: HashMap<u64, Value>,
}

impl NumberTransport {
    pub fn respond(mut self, national_number: u64, document: Value) -> Self {
        self.responses.insert(national_number, document);
        self
    }
}

#[async_trait]
impl ProvisioningTransport for NumberTransport {
    async fn call(&self, _method: &str, body: Value) -> Result<Value> {
        let base = body["TN"]["Base"].as_u64().unwrap_or_default();
        self.responses
            .get(&base)
            .cloned()
            .ok_or_else(|| ProvisioningError::Transport {
                detail: format!("unknown number {base}"),
            })
    }
}

// ============ Formatter ============

/// Formatter that records its arguments and answers `+{cc}{nn}`.
#[derive(Default)]
pub struct RecordingFormatter {
    calls: Mutex<Vec<(u64, u16)>>,
}

impl RecordingFormatter {
    pub fn calls(&self) -> Vec<(u64, u16)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PhoneFormatter for RecordingFormatter {
    fn format(&self, national_number: u64, country_code: u16) -> String {
        self.calls
            .lock()
            .unwrap()
            .push((national_number, country_code));
        format!("+{country_code}{national_number}")
    }
}

// ============ Fixtures ============

pub const DATE_CREATED: &str = "2017-05-25T21:45:57.021Z";

/// A response envelope with the given code, messages and optional `ResponseData`.
pub fn envelope(code: i64, messages: &[&str], response_data: Option<Value>) -> Value {
    let text: Vec<Value> = messages.iter().map(|m| json!({ "_": m })).collect();
    let mut response = json!({
        "ReturnCode": { "_": code.to_string() },
        "TextMessage": text,
    });
    if let Some(data) = response_data {
        response["ResponseData"] = data;
    }
    json!({ "Envelope": { "Body": { "Response": response } } })
}

/// A string-typed NAPTR element as the server sends it.
pub fn naptr(order: u16, preference: u16) -> Value {
    json!({
        "$": { "ttl": "800" },
        "DomainName": "domain",
        "Order": order.to_string(),
        "Preference": preference.to_string(),
        "Flags": "t",
        "Service": "E2U+mm",
        "Regexp": { "$": { "pattern": "^(.*)$" }, "_": "mm:001.504@mojaloop.org" },
        "Replacement": ".",
        "Partner": { "$": { "id": "333" } }
    })
}

/// A successful `queryProfile` response carrying `naptr` verbatim.
pub fn profile_document(profile_id: &str, naptr: Value) -> Value {
    envelope(
        200,
        &["OK", "DNS profile queried successfully"],
        Some(json!({
            "DNSProfileData": {
                "ProfileID": profile_id,
                "Tier": "3",
                "Customer": { "$": { "id": "222" } },
                "IsInUse": "False",
                "DateCreated": DATE_CREATED,
                "NAPTR": naptr
            }
        })),
    )
}

/// One `TNData` entry.
pub fn tn_data(national_number: u64, country_code: u16, profile_id: &str) -> Value {
    json!({
        "TN": {
            "Base": national_number.to_string(),
            "CountryCode": country_code.to_string()
        },
        "Customer": { "$": { "id": "222" } },
        "DateCreated": DATE_CREATED,
        "Status": "active",
        "DNSProfileID": profile_id,
        "Tier": "3"
    })
}

/// A successful `queryNumber` response carrying `tn_data` verbatim.
pub fn number_document(tn_data: Value) -> Value {
    envelope(
        200,
        &["OK", "TN profile queried successfully"],
        Some(json!({ "TNData": tn_data })),
    )
}
