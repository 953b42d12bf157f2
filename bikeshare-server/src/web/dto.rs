//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::stations::{FieldSelection, FilterError, StationQuery};

/// Query string of `GET /v1/stations`.
#[derive(Debug, Default, Deserialize)]
pub struct ListStationsRequest {
    /// Comma-separated field names to include
    pub fields: Option<String>,

    /// Maximum number of stations; 0 means no limit
    pub limit: Option<usize>,

    /// Filter expression such as `>5` or `<=2`
    pub num_bikes_available: Option<String>,

    /// Filter expression such as `>5` or `<=2`
    pub num_docks_available: Option<String>,
}

impl ListStationsRequest {
    /// Compile into a query. Fails on a malformed filter expression.
    pub fn to_query(&self) -> Result<StationQuery, FilterError> {
        let mut query = StationQuery::new();

        if let Some(fields) = &self.fields {
            query = query.with_fields(fields);
        }
        if let Some(limit) = self.limit {
            query = query.with_limit(limit);
        }
        if let Some(expr) = &self.num_bikes_available {
            query = query.with_filter("num_bikes_available", expr)?;
        }
        if let Some(expr) = &self.num_docks_available {
            query = query.with_filter("num_docks_available", expr)?;
        }

        Ok(query)
    }
}

/// Query string of `GET /v1/stations/:station_id`.
#[derive(Debug, Default, Deserialize)]
pub struct GetStationRequest {
    /// Comma-separated field names to include
    pub fields: Option<String>,
}

impl GetStationRequest {
    pub fn selection(&self) -> Option<FieldSelection> {
        self.fields
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .map(FieldSelection::parse)
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
