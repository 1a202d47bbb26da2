//! # Trend Forecast
//!
//! A Rust library for projecting search-keyword interest into the future.
//!
//! ## Features
//!
//! - Interest time series handling (date/value pairs on a 0-100 scale)
//! - Keyword-conditioned growth profiles (saturating, cyclical, seasonal)
//! - Alternate trend-decay prediction strategy (OLS slope with decaying influence)
//! - Summary statistics (peak date, averages, trend direction)
//! - Caller-supplied random source for reproducible output
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rand::SeedableRng;
//! use trend_forecast::projector::{ProjectionRequest, Projector};
//! use trend_forecast::series::InterestSeries;
//!
//! let historical = InterestSeries::new(
//!     vec![
//!         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
//!     ],
//!     vec![40.0, 55.0],
//! )?;
//!
//! let projector = Projector::with_defaults();
//! let request = ProjectionRequest {
//!     keyword: "artificial intelligence",
//!     historical: &historical,
//!     range_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     range_end: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
//! };
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let projection = projector.project(&request, &mut rng)?;
//!
//! assert!(projection.series.len() <= 50);
//! # Ok::<(), trend_forecast::TrendError>(())
//! ```

pub mod error;
pub mod models;
pub mod projector;
pub mod series;
pub mod stats;

// Re-export commonly used types
pub use crate::error::TrendError;
pub use crate::models::{GrowthProfile, PredictionStrategy};
pub use crate::projector::{Projection, ProjectionRequest, Projector, ProjectorConfig};
pub use crate::series::InterestSeries;
pub use crate::stats::{Summary, TrendDirection};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
