//! A small polls site: visitors list open and closed questions, vote on a
//! choice, and read the results.
//!
//! Questions are visible between their publish date and their expiry date;
//! after expiry they move to the "past" list but their pages stay reachable.
#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod poll;
pub mod routes;
pub mod state;
pub mod store;
pub mod templates;
