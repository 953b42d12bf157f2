//! Station reconciliation, filtering and projection.
//!
//! Everything here is synchronous and pure: the fetched feeds go in,
//! records shaped for the caller come out.

mod filter;
mod projection;
mod query;
mod reconcile;

pub use filter::{Comparison, FilterError, FilterField, Predicate, apply_all, compile_predicate};
pub use projection::{FieldSelection, FieldValue, PartialStationRecord, StationField, project};
pub use query::StationQuery;
pub use reconcile::{Reconciliation, reconcile};
