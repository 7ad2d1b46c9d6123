//! Timestamp (de)serialization for backend payloads.
//!
//! The backend emits RFC 3339 strings from its newer handlers and fractional
//! epoch seconds from the older function runtime, so deserialization accepts
//! both. Serialization always produces RFC 3339.

use serde::{Deserialize, Deserializer, Serializer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Deserialize an RFC 3339 string or fractional epoch seconds into an
/// OffsetDateTime.
pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Timestamp {
        Text(String),
        EpochSeconds(f64),
    }

    match Timestamp::deserialize(deserializer)? {
        Timestamp::Text(s) => OffsetDateTime::parse(&s, &Rfc3339).map_err(serde::de::Error::custom),
        Timestamp::EpochSeconds(secs) => {
            let nanos = (secs * 1e9) as i128;
            OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(serde::de::Error::custom)
        }
    }
}

/// Serialize an OffsetDateTime into an RFC 3339 formatted string.
pub fn serialize<S>(datetime: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let s = datetime
        .format(&Rfc3339)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&s)
}
