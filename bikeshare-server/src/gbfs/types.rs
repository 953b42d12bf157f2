//! GBFS response envelopes.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{StationInfo, StationStatus, deserialize_timestamp};

/// Common envelope of every GBFS document.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse<T> {
    /// When the publisher last refreshed this document.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_updated: DateTime<Utc>,

    /// Seconds until the publisher expects to refresh again.
    #[serde(default)]
    pub ttl: Option<u32>,

    /// Document payload.
    pub data: T,
}

/// Payload of `station_information.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInformation {
    pub stations: Vec<StationInfo>,
}

/// Payload of `station_status.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationStatuses {
    pub stations: Vec<StationStatus>,
}

pub type StationInformationResponse = FeedResponse<StationInformation>;
pub type StationStatusResponse = FeedResponse<StationStatuses>;
