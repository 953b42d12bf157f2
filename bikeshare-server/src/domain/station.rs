//! Station metadata, live status, and the reconciled record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::flag::deserialize_flag;
use super::time::deserialize_timestamp;

/// Static metadata for one station, from `station_information.json`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StationInfo {
    /// Stable identifier, shared with the status feed.
    pub station_id: String,

    /// Display name.
    pub name: String,

    /// Street address, if the operator publishes one.
    #[serde(default)]
    pub address: Option<String>,

    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lon: f64,

    /// Total number of docks.
    pub capacity: u32,
}

/// Live telemetry for one station, from `station_status.json`.
///
/// The `is_*` flags are kept as 0/1 integers, whether the feed publishes
/// them as integers or booleans.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StationStatus {
    pub station_id: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_installed: u8,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_renting: u8,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_returning: u8,
    pub num_bikes_available: u32,
    pub num_docks_available: u32,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_reported: DateTime<Utc>,
}

/// A station with both its metadata and its current status.
///
/// Only exists for ids present in both feeds at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    pub station_id: String,
    pub name: String,
    pub address: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub capacity: u32,
    pub is_installed: u8,
    pub is_renting: u8,
    pub is_returning: u8,
    pub num_bikes_available: u32,
    pub num_docks_available: u32,
    pub last_reported: DateTime<Utc>,
}

impl StationRecord {
    /// Merge metadata and status for the same station.
    ///
    /// The two sources have disjoint field sets apart from `station_id`,
    /// which is taken from the status side.
    pub fn merge(info: StationInfo, status: StationStatus) -> Self {
        debug_assert_eq!(info.station_id, status.station_id);
        Self {
            station_id: status.station_id,
            name: info.name,
            address: info.address,
            lat: info.lat,
            lon: info.lon,
            capacity: info.capacity,
            is_installed: status.is_installed,
            is_renting: status.is_renting,
            is_returning: status.is_returning,
            num_bikes_available: status.num_bikes_available,
            num_docks_available: status.num_docks_available,
            last_reported: status.last_reported,
        }
    }
}
