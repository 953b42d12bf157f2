//! The per-request fetch, join and query cycle.
//!
//! Nothing is cached between calls: every list or lookup fetches both
//! feeds again and rebuilds the joined records from scratch.

use tracing::debug;

use crate::gbfs::{FetchError, GbfsClient};
use crate::stations::{
    FieldSelection, FilterError, PartialStationRecord, Reconciliation, StationQuery, reconcile,
};

/// Errors from a station list or lookup.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Either feed could not be fetched
    #[error("station feed unavailable: {0}")]
    Fetch(#[from] FetchError),

    /// Caller supplied a malformed filter
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// No station with the requested id
    #[error("station {station_id} not found")]
    NotFound { station_id: String },
}

/// Station queries backed by a GBFS feed.
#[derive(Debug, Clone)]
pub struct StationService {
    client: GbfsClient,
}

impl StationService {
    pub fn new(client: GbfsClient) -> Self {
        Self { client }
    }

    /// Fetch both feeds and join them.
    ///
    /// The two requests run concurrently. If either fails the other is
    /// dropped and the error is returned; there is no partial result.
    pub async fn fetch_stations(&self) -> Result<Reconciliation, FetchError> {
        let (infos, statuses) = tokio::try_join!(
            self.client.fetch_information(),
            self.client.fetch_status()
        )?;

        let reconciliation = reconcile(infos, statuses);
        reconciliation.log_coverage();
        debug!(
            stations = reconciliation.records.len(),
            dropped = reconciliation.dropped(),
            "reconciled station feeds"
        );

        Ok(reconciliation)
    }

    /// List stations matching a query.
    pub async fn list(&self, query: &StationQuery) -> Result<Vec<PartialStationRecord>, QueryError> {
        let stations = self.fetch_stations().await?;
        Ok(query.run(stations.records))
    }

    /// Look up a single station by id.
    pub async fn get(
        &self,
        station_id: &str,
        fields: Option<&FieldSelection>,
    ) -> Result<PartialStationRecord, QueryError> {
        let stations = self.fetch_stations().await?;

        let record = stations
            .records
            .iter()
            .find(|r| r.station_id == station_id)
            .ok_or_else(|| QueryError::NotFound {
                station_id: station_id.to_string(),
            })?;

        Ok(match fields {
            Some(selection) => selection.apply(record),
            None => PartialStationRecord::full(record),
        })
    }
}
