//! GBFS feed client.
//!
//! A GBFS publisher exposes station metadata and station status as two
//! separately refreshed JSON documents under a common base URL:
//! - `station_information.json`: names, positions, capacity
//! - `station_status.json`: bikes and docks available right now
//!
//! Both share the envelope `{ "last_updated": ..., "data": { "stations": [...] } }`.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_BASE_URL, GbfsClient, GbfsConfig};
pub use error::FetchError;
pub use types::{
    FeedResponse, StationInformation, StationInformationResponse, StationStatusResponse,
    StationStatuses,
};
