//! Wire-format plumbing for provisioning response documents.
//!
//! Documents follow the xml2js convention: element text lives under `_`,
//! attributes under `$`, and an element that repeats is a sequence while a
//! lone element is a bare object. Everything here exists to turn that shape
//! into plain Rust values; domain types are built from it in `types` and
//! `result`.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProvisioningError, Result, SUCCESS_CODE};
use crate::types::TelephoneNumber;
use crate::utils::log_sanitizer::truncate_for_log;

// ============ Singleton / sequence ============

/// A field that is a bare value when it occurs once and a sequence otherwise.
///
/// Every sub-parser goes through [`OneOrMany::into_vec`] (or [`many`]) so
/// the two shapes can never be handled differently.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Normalize to an ordered sequence, preserving source order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        value.into_vec()
    }
}

/// Normalize an optional singleton-or-sequence field. Absent means empty.
pub fn many<T>(field: Option<OneOrMany<T>>) -> Vec<T> {
    field.map(OneOrMany::into_vec).unwrap_or_default()
}

// ============ Scalars ============

#[derive(Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Wrapped {
        #[serde(rename = "_", default)]
        value: String,
    },
    Bare(String),
}

/// Element text, either wrapped as `{"_": "..."}` or given bare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TextRepr")]
pub struct Text {
    #[serde(rename = "_")]
    pub value: String,
}

impl From<TextRepr> for Text {
    fn from(repr: TextRepr) -> Self {
        match repr {
            TextRepr::Wrapped { value } | TextRepr::Bare(value) => Self { value },
        }
    }
}

impl From<Text> for String {
    fn from(text: Text) -> Self {
        text.value
    }
}

/// Element carrying its payload in the `$` attribute map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributed<A> {
    #[serde(rename = "$")]
    pub attrs: A,
}

impl<A> Attributed<A> {
    pub fn new(attrs: A) -> Self {
        Self { attrs }
    }
}

/// `{"$": {"id": "..."}}`, used by `Customer` and `Partner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAttr {
    #[serde(deserialize_with = "numeric::deserialize")]
    pub id: u64,
}

/// Numbers that arrive as numeric strings (or, leniently, as JSON numbers).
///
/// Use with `#[serde(deserialize_with = "numeric::deserialize")]`, or
/// `numeric::option` together with `#[serde(default)]` for optional fields.
pub mod numeric {
    use super::{Deserialize, Deserializer, Display, FromStr, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr<T> {
        Str(String),
        Num(T),
    }

    fn resolve<T, E>(repr: Repr<T>) -> Result<T, E>
    where
        T: FromStr,
        T::Err: Display,
        E: de::Error,
    {
        match repr {
            Repr::Str(s) => s
                .trim()
                .parse()
                .map_err(|e| E::custom(format!("invalid numeric string {s:?}: {e}"))),
            Repr::Num(n) => Ok(n),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + Deserialize<'de>,
        T::Err: Display,
    {
        resolve(Repr::deserialize(deserializer)?)
    }

    pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + Deserialize<'de>,
        T::Err: Display,
    {
        Option::<Repr<T>>::deserialize(deserializer)?
            .map(resolve)
            .transpose()
    }
}

// ============ Envelope ============

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "Envelope")]
    envelope: Envelope,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Body")]
    body: Body,
}

#[derive(Debug, Deserialize)]
struct Body {
    #[serde(rename = "Response")]
    response: Response,
}

/// `Envelope.Body.Response`.
///
/// `ResponseData` is kept raw: its shape is only guaranteed on success, so it
/// is interpreted by [`payload`] once the return code is known.
#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(rename = "ReturnCode")]
    pub return_code: Text,
    #[serde(rename = "TextMessage")]
    pub text_message: Option<OneOrMany<Text>>,
    #[serde(rename = "ResponseData")]
    pub response_data: Option<Value>,
}

impl Response {
    /// The numeric return code.
    pub fn code(&self) -> Result<i64> {
        let raw = self.return_code.value.trim();
        raw.parse().map_err(|e| ProvisioningError::MalformedResponse {
            detail: format!("ReturnCode {raw:?} is not an integer: {e}"),
        })
    }

    /// Split into the diagnostic messages and the raw `ResponseData`.
    ///
    /// Anything other than an object (xml2js renders `<ResponseData/>` as
    /// `""`) counts as no payload.
    pub fn into_parts(self) -> (Vec<String>, Option<Value>) {
        let messages = many(self.text_message)
            .into_iter()
            .map(String::from)
            .collect();
        let data = self.response_data.filter(Value::is_object);
        (messages, data)
    }
}

/// Extract `Envelope.Body.Response` from a raw document.
pub fn parse_response(document: &Value) -> Result<Response> {
    Document::deserialize(document)
        .map(|doc| doc.envelope.body.response)
        .map_err(|e| {
            log::error!("Response document parse failed: {e}");
            log::error!("Raw response: {}", truncate_for_log(&document.to_string()));
            ProvisioningError::MalformedResponse {
                detail: e.to_string(),
            }
        })
}

/// Read the `key` element of a raw `ResponseData`.
///
/// A missing element is `None`. An element that does not match `D` is an
/// error only when `code` is [`SUCCESS_CODE`]; on any other code it is
/// dropped so the code itself decides the outcome.
pub fn payload<D>(response_data: Option<Value>, key: &str, code: i64) -> Result<Option<D>>
where
    D: DeserializeOwned,
{
    let Some(element) = response_data.and_then(|mut data| data.get_mut(key).map(Value::take))
    else {
        return Ok(None);
    };
    match D::deserialize(&element) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) if code == SUCCESS_CODE => {
            log::error!("{key} parse failed: {e}");
            log::error!("Raw {key}: {}", truncate_for_log(&element.to_string()));
            Err(ProvisioningError::MalformedResponse {
                detail: format!("{key}: {e}"),
            })
        }
        Err(e) => {
            log::debug!("Ignoring unreadable {key} on return code {code}: {e}");
            Ok(None)
        }
    }
}

// ============ Payloads ============

/// `DNSProfileData`.
#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    #[serde(rename = "ProfileID")]
    pub profile_id: String,
    #[serde(rename = "Tier", default, deserialize_with = "numeric::option")]
    pub tier: Option<u32>,
    #[serde(rename = "Customer")]
    pub customer: Attributed<IdAttr>,
    #[serde(rename = "IsInUse")]
    pub is_in_use: Option<String>,
    #[serde(rename = "DateCreated")]
    pub date_created: Option<String>,
    #[serde(rename = "NAPTR")]
    pub naptr: Option<OneOrMany<NaptrData>>,
}

/// One `TNData` entry.
#[derive(Debug, Deserialize)]
pub struct TnPayload {
    #[serde(rename = "TN")]
    pub tn: TelephoneNumber,
    #[serde(rename = "Customer")]
    pub customer: Attributed<IdAttr>,
    #[serde(rename = "DateCreated")]
    pub date_created: Option<String>,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "DNSProfileID")]
    pub profile_id: String,
    #[serde(rename = "Tier", deserialize_with = "numeric::deserialize")]
    pub tier: u32,
}

/// `{"$": {"ttl": ...}}` on a NAPTR element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlAttr {
    #[serde(deserialize_with = "numeric::deserialize")]
    pub ttl: u32,
}

/// `{"pattern": ...}` on a `Regexp` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternAttr {
    pub pattern: String,
}

/// `Regexp`: the pattern is an attribute, the replacement is the element text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexpData {
    #[serde(rename = "$")]
    pub attrs: PatternAttr,
    #[serde(rename = "_")]
    pub replace: String,
}

/// A NAPTR element as it appears on the wire, in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaptrData {
    #[serde(rename = "$")]
    pub attrs: TtlAttr,
    #[serde(rename = "DomainName")]
    pub domain_name: String,
    #[serde(rename = "Order", deserialize_with = "numeric::deserialize")]
    pub order: u16,
    #[serde(rename = "Preference", deserialize_with = "numeric::deserialize")]
    pub preference: u16,
    #[serde(rename = "Flags")]
    pub flags: String,
    #[serde(rename = "Service")]
    pub service: String,
    #[serde(rename = "Regexp")]
    pub regexp: RegexpData,
    #[serde(rename = "Replacement")]
    pub replacement: String,
    #[serde(rename = "Partner")]
    pub partner: Attributed<IdAttr>,
}
