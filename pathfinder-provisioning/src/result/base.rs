use serde_json::Value;

use crate::error::Result;
use crate::wire::parse_response;

use super::ResponseEnvelope;

/// Envelope common to every response: return code and diagnostic messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseResult {
    pub code: i64,
    pub messages: Vec<String>,
    /// `ResponseData` as sent, uninterpreted. `None` when absent or empty.
    pub data: Option<Value>,
}

impl BaseResult {
    /// Parse the envelope.
    pub fn parse(document: &Value) -> Result<Self> {
        let response = parse_response(document)?;
        let code = response.code()?;
        let (messages, data) = response.into_parts();
        Ok(Self {
            code,
            messages,
            data,
        })
    }
}

impl ResponseEnvelope for BaseResult {
    fn code(&self) -> i64 {
        self.code
    }

    fn messages(&self) -> &[String] {
        &self.messages
    }
}
