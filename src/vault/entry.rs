//! Credential entries stored inside the vault.
//!
//! Entries serialize to the same JSON shape used by backups:
//!
//! ```json
//! { "id": "...", "title": "...", "username": "...", "password": "...",
//!   "url": "...", "notes": "...", "category": "...",
//!   "createdAt": "2024-05-01T12:00:00.000Z", "updatedAt": "..." }
//! ```
//!
//! `url`, `notes` and `category` are omitted when absent.  Passwords are
//! plaintext here; confidentiality comes from encrypting the whole
//! collection.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One saved credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialEntry {
    /// Opaque unique id, assigned by the store.
    pub id: String,

    pub title: String,

    pub username: String,

    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Set once when the entry is added.
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,

    /// Set on creation and advanced on every update.
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

/// The caller-supplied part of an entry, before the store assigns an
/// id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub title: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewEntry {
    pub fn new(
        title: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }
}

impl CredentialEntry {
    /// Build a stored entry from its parts.
    pub(crate) fn from_new(new: NewEntry, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            username: new.username,
            password: new.password,
            url: new.url,
            notes: new.notes,
            category: new.category,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Current time, truncated to the millisecond precision entries are
/// persisted with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A timestamp strictly later than `previous`.
///
/// Normally the current time; if the clock has not moved past
/// `previous` (same millisecond, or a clock step backwards) it is
/// `previous + 1ms`.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    if current > previous {
        current
    } else {
        previous + TimeDelta::milliseconds(1)
    }
}

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix appended to every id.
const ID_RANDOM_LEN: usize = 10;

/// Generate a new entry id: base36 Unix millis followed by a random
/// base36 suffix.
pub fn generate_id() -> String {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let mut id = to_base36(millis);
    let mut rng = rand::rng();
    for _ in 0..ID_RANDOM_LEN {
        id.push(char::from(BASE36[rng.random_range(0..BASE36.len())]));
    }
    id
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        // `value % 36` is always < 36.
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
///
/// Any RFC 3339 timestamp is accepted on input and truncated to
/// milliseconds, so a parsed entry is exactly what gets persisted.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(3))
            .map_err(serde::de::Error::custom)
    }
}
