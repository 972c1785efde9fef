//! Core library for the `wttr` CLI.
//!
//! This crate defines:
//! - City-name validation ([`CityQuery`])
//! - The fetcher for the wttr.in `j1` JSON endpoint
//! - Parsing and rendering of the current-conditions report
//!
//! It is used by `wttr-cli`, but can also be reused by other binaries or services.

pub mod fetch;
pub mod model;
pub mod report;

pub use fetch::{FetchError, fetch};
pub use model::{CityQuery, InvalidCity, WeatherReport};
pub use report::{Outcome, report};
