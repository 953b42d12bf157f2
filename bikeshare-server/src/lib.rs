//! Bike-share station API.
//!
//! Reads station metadata and live availability from a GBFS feed, joins
//! the two by station id, and serves the result over HTTP with optional
//! filtering and field selection.

pub mod config;
pub mod domain;
pub mod gbfs;
pub mod service;
pub mod stations;
pub mod table;
pub mod web;

#[cfg(test)]
mod testing;
