//! HTTP layer for the station API.
//!
//! Routes:
//! - `GET /v1/stations` lists stations, with optional `fields`, `limit`
//!   and `num_bikes_available` / `num_docks_available` filters
//! - `GET /v1/stations/:station_id` looks up a single station
//! - `GET /health`, `/live`, `/ready` for probes

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
