use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::wire::{Attributed, IdAttr, NaptrData, PatternAttr, RegexpData, TtlAttr, numeric};

/// Tier assigned to a profile when none is given.
pub const DEFAULT_TIER: u32 = 2;

// ============ Operations ============

/// The three result shapes a response document can be parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// Envelope only: return code and messages.
    Base,
    /// Envelope plus `DNSProfileData`.
    QueryProfile,
    /// Envelope plus one or more `TNData` entries.
    QueryNumber,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::QueryProfile => "queryProfile",
            Self::QueryNumber => "queryNumber",
        }
    }
}

/// Remote methods exposed by the provisioning server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteMethod {
    DefineDnsProfile,
    UpdateDnsProfile,
    QueryDnsProfile,
    DeleteDnsProfile,
    ActivateTn,
    QueryTn,
    DeactivateTn,
}

impl RemoteMethod {
    /// Method name as sent to the server.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DefineDnsProfile => "DefineDNSProfile",
            Self::UpdateDnsProfile => "UpdateDNSProfile",
            Self::QueryDnsProfile => "QueryDNSProfile",
            Self::DeleteDnsProfile => "DeleteDNSProfile",
            Self::ActivateTn => "ActivateTN",
            Self::QueryTn => "QueryTN",
            Self::DeactivateTn => "DeactivateTN",
        }
    }

    /// Which parser handles this method's response.
    pub fn operation(self) -> Operation {
        match self {
            Self::QueryDnsProfile => Operation::QueryProfile,
            Self::QueryTn => Operation::QueryNumber,
            Self::DefineDnsProfile
            | Self::UpdateDnsProfile
            | Self::DeleteDnsProfile
            | Self::ActivateTn
            | Self::DeactivateTn => Operation::Base,
        }
    }
}

// ============ Telephone number ============

/// A telephone number split the way the server transmits it (`TN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TelephoneNumber {
    #[serde(rename = "Base", deserialize_with = "numeric::deserialize")]
    pub national_number: u64,
    #[serde(rename = "CountryCode", deserialize_with = "numeric::deserialize")]
    pub country_code: u16,
}

impl TelephoneNumber {
    pub fn new(national_number: u64, country_code: u16) -> Self {
        Self {
            national_number,
            country_code,
        }
    }
}

// ============ Record ============

/// The substitution expression of a NAPTR record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regexp {
    pub pattern: String,
    pub replace: String,
}

/// One NAPTR routing rule belonging to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub ttl: u32,
    pub domain: String,
    pub order: u16,
    pub preference: u16,
    pub flags: String,
    pub service: String,
    pub regexp: Regexp,
    pub replacement: String,
    pub partner_id: u64,
}

impl Record {
    /// The NAPTR element to submit for this record.
    pub fn to_soap(&self) -> NaptrData {
        NaptrData {
            attrs: TtlAttr { ttl: self.ttl },
            domain_name: self.domain.clone(),
            order: self.order,
            preference: self.preference,
            flags: self.flags.clone(),
            service: self.service.clone(),
            regexp: RegexpData {
                attrs: PatternAttr {
                    pattern: self.regexp.pattern.clone(),
                },
                replace: self.regexp.replace.clone(),
            },
            replacement: self.replacement.clone(),
            partner: Attributed::new(IdAttr {
                id: self.partner_id,
            }),
        }
    }
}

impl From<NaptrData> for Record {
    fn from(naptr: NaptrData) -> Self {
        Self {
            ttl: naptr.attrs.ttl,
            domain: naptr.domain_name,
            order: naptr.order,
            preference: naptr.preference,
            flags: naptr.flags,
            service: naptr.service,
            regexp: Regexp {
                pattern: naptr.regexp.attrs.pattern,
                replace: naptr.regexp.replace,
            },
            replacement: naptr.replacement,
            partner_id: naptr.partner.attrs.id,
        }
    }
}

// ============ Record list ============

/// Shared, mutable, ordered list of records.
///
/// Clones alias the same backing sequence: a record pushed or a `clear()`
/// through any handle is observed by all of them. Use [`RecordList::same_list`]
/// to test identity and `==` to compare contents.
#[derive(Debug, Clone, Default)]
pub struct RecordList(Arc<RwLock<Vec<Record>>>);

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Record>> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Record>> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, record: Record) {
        self.write().push(record);
    }

    /// Empty the list in place.
    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Record> {
        self.read().get(index).cloned()
    }

    /// Snapshot of the current contents.
    pub fn to_vec(&self) -> Vec<Record> {
        self.read().clone()
    }

    /// Run `f` against the current contents without copying them.
    pub fn with<R>(&self, f: impl FnOnce(&[Record]) -> R) -> R {
        f(&self.read())
    }

    /// Whether both handles refer to the same backing sequence.
    pub fn same_list(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Vec<Record>> for RecordList {
    fn from(records: Vec<Record>) -> Self {
        Self(Arc::new(RwLock::new(records)))
    }
}

impl PartialEq for RecordList {
    /// Compares contents. Never holds both locks at once.
    fn eq(&self, other: &Self) -> bool {
        if self.same_list(other) {
            return true;
        }
        let mine = self.to_vec();
        other.with(|theirs| mine.as_slice() == theirs)
    }
}

impl Eq for RecordList {}

// ============ Profile ============

/// Construction options for [`Profile`].
///
/// When deserialized, a `records` value that is not a sequence is treated as
/// absent rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileOptions {
    pub id: String,
    #[serde(default)]
    pub tier: Option<u32>,
    #[serde(default, deserialize_with = "records_if_sequence")]
    pub records: Option<RecordList>,
}

impl ProfileOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn tier(mut self, tier: u32) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Adopt `records` as the profile's list. The handle is shared, not copied.
    #[must_use]
    pub fn records(mut self, records: RecordList) -> Self {
        self.records = Some(records);
        self
    }
}

fn records_if_sequence<'de, D>(deserializer: D) -> Result<Option<RecordList>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Array(_) => Vec::<Record>::deserialize(value)
            .map(|records| Some(RecordList::from(records)))
            .map_err(de::Error::custom),
        _ => Ok(None),
    }
}

/// A DNS profile: identifier, service tier and ordered NAPTR records.
#[derive(Debug, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub tier: u32,
    records: RecordList,
}

impl Profile {
    pub fn new(options: ProfileOptions) -> Self {
        Self {
            id: options.id,
            tier: options.tier.unwrap_or(DEFAULT_TIER),
            records: options.records.unwrap_or_default(),
        }
    }

    /// The profile's record list. Clone it to keep a handle that observes later changes.
    pub fn records(&self) -> &RecordList {
        &self.records
    }

    pub fn add_record(&self, record: Record) {
        self.records.push(record);
    }

    /// Remove all records, keeping the same list.
    pub fn clear_records(&self) {
        self.records.clear();
    }

    /// The `DNSProfileData` body to submit for this profile.
    pub fn to_soap(&self) -> SoapProfile {
        SoapProfile {
            profile_id: self.id.clone(),
            tier: self.tier,
            naptr: self.records.with(|records| records.iter().map(Record::to_soap).collect()),
        }
    }
}

/// Submission shape of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoapProfile {
    #[serde(rename = "ProfileID")]
    pub profile_id: String,
    #[serde(rename = "Tier")]
    pub tier: u32,
    #[serde(rename = "NAPTR")]
    pub naptr: Vec<NaptrData>,
}
