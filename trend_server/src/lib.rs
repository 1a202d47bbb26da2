//! HTTP surface for keyword interest projection
//!
//! Thin glue around the `trend_forecast` engine: one data endpoint, a static
//! page, and a configurable historical-data provider.

pub mod api;
pub mod config;
pub mod provider;
pub mod telemetry;
