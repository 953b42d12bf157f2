//! Joining station metadata with station status.
//!
//! The two feeds are refreshed independently by the publisher, so a
//! snapshot of one can mention stations the other doesn't know about
//! (a newly installed dock, a station being decommissioned). Only ids
//! present in both produce a `StationRecord`. The rest are reported,
//! never treated as an error.

use std::collections::HashMap;

use tracing::warn;

use crate::domain::{StationInfo, StationRecord, StationStatus};

/// Outcome of joining the two feeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// One record per id present in both feeds, in status-feed order.
    pub records: Vec<StationRecord>,

    /// Ids that have a status but no metadata, in status-feed order.
    pub missing_information: Vec<String>,

    /// Ids that have metadata but no status, in metadata-feed order.
    pub missing_status: Vec<String>,
}

impl Reconciliation {
    /// True when both feeds covered exactly the same stations.
    pub fn is_complete(&self) -> bool {
        self.missing_information.is_empty() && self.missing_status.is_empty()
    }

    /// Number of ids dropped because only one feed had them.
    pub fn dropped(&self) -> usize {
        self.missing_information.len() + self.missing_status.len()
    }

    /// Emit a warning for each side of any coverage mismatch.
    pub fn log_coverage(&self) {
        if !self.missing_information.is_empty() {
            warn!(
                count = self.missing_information.len(),
                ids = ?self.missing_information,
                "stations have a status but no metadata"
            );
        }
        if !self.missing_status.is_empty() {
            warn!(
                count = self.missing_status.len(),
                ids = ?self.missing_status,
                "stations have metadata but no status"
            );
        }
    }
}

/// Key items by station id. Later duplicates replace earlier ones but
/// keep the position of the first occurrence.
fn index_by_id<T>(items: Vec<T>, id: fn(&T) -> &str) -> (Vec<String>, HashMap<String, T>) {
    let mut order = Vec::with_capacity(items.len());
    let mut by_id = HashMap::with_capacity(items.len());

    for item in items {
        let key = id(&item).to_string();
        if by_id.insert(key.clone(), item).is_none() {
            order.push(key);
        }
    }

    (order, by_id)
}

fn info_id(info: &StationInfo) -> &str {
    &info.station_id
}

fn status_id(status: &StationStatus) -> &str {
    &status.station_id
}

/// Join metadata and status records on `station_id`.
pub fn reconcile(infos: Vec<StationInfo>, statuses: Vec<StationStatus>) -> Reconciliation {
    let (info_order, mut info_by_id) = index_by_id(infos, info_id);
    let (status_order, mut status_by_id) = index_by_id(statuses, status_id);

    let mut records = Vec::with_capacity(status_order.len());
    let mut missing_information = Vec::new();

    for id in status_order {
        let Some(status) = status_by_id.remove(&id) else {
            continue;
        };
        match info_by_id.remove(&id) {
            Some(info) => records.push(StationRecord::merge(info, status)),
            None => missing_information.push(id),
        }
    }

    let missing_status = info_order
        .into_iter()
        .filter(|id| info_by_id.contains_key(id))
        .collect();

    Reconciliation {
        records,
        missing_information,
        missing_status,
    }
}
