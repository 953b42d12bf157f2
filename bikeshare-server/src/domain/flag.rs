//! Station flag decoding.
//!
//! GBFS 1.x publishes `is_installed`, `is_renting` and `is_returning` as
//! 0/1 integers. GBFS 2.0 and later publish JSON booleans. Both decode to
//! the integer form.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Integer(u8),
    Boolean(bool),
}

/// Serde adapter for station flags, used with `deserialize_with`.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawFlag::deserialize(deserializer)? {
        RawFlag::Integer(value) => value,
        RawFlag::Boolean(value) => u8::from(value),
    })
}
