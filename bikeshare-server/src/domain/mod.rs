//! Domain types for the bike-share station API.
//!
//! `StationInfo` and `StationStatus` mirror the two upstream feeds.
//! `StationRecord` is the reconciled view of one station, built fresh
//! for every request and never mutated afterwards.

mod flag;
mod station;
mod time;

pub use flag::deserialize_flag;
pub use station::{StationInfo, StationRecord, StationStatus};
pub use time::{InvalidTimestamp, deserialize_timestamp, parse_timestamp};
