//! Query assembly: filter, then limit, then project.

use crate::domain::StationRecord;

use super::filter::{FilterError, Predicate, apply_all, compile_predicate};
use super::projection::{FieldSelection, PartialStationRecord, project};

/// A caller's station-list query, with filters already compiled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationQuery {
    /// Fields to return. `None` returns every field.
    pub fields: Option<FieldSelection>,

    /// Maximum number of records to return. `None` returns all.
    pub limit: Option<usize>,

    /// Predicates that must all hold.
    pub predicates: Vec<Predicate>,
}

impl StationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict output to a comma-separated field list.
    ///
    /// A blank list leaves the selection unset.
    pub fn with_fields(mut self, list: &str) -> Self {
        self.fields = if list.trim().is_empty() {
            None
        } else {
            Some(FieldSelection::parse(list))
        };
        self
    }

    /// Cap the number of records returned. Zero means no cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    /// Add a filter on `field`, compiling `expression` immediately.
    pub fn with_filter(mut self, field: &str, expression: &str) -> Result<Self, FilterError> {
        self.predicates.push(compile_predicate(field, expression)?);
        Ok(self)
    }

    /// Run the query over reconciled records.
    pub fn run(&self, records: Vec<StationRecord>) -> Vec<PartialStationRecord> {
        let mut kept = apply_all(records, &self.predicates);
        if let Some(limit) = self.limit {
            kept.truncate(limit);
        }
        project(&kept, self.fields.as_ref())
    }
}
