//! Linear-trend prediction with decaying influence
//!
//! Alternate prediction style: fit an ordinary-least-squares line to the
//! recent historical window and extrapolate from the last observation,
//! letting the slope's influence fall off linearly to zero across the
//! forecast horizon.

use crate::error::{Result, TrendError};
use crate::models::DAYS_PER_YEAR;
use std::f64::consts::PI;

/// Ordinary-least-squares slope of `values` against the index sequence 0..n-1.
pub fn linear_slope(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(TrendError::InsufficientData(
            "Need at least 2 points to fit a trend line".to_string(),
        ));
    }

    let n = values.len() as f64;
    let x_mean = (0..values.len()).map(|i| i as f64).sum::<f64>() / n;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        numerator += (x - x_mean) * (y - y_mean);
        denominator += (x - x_mean) * (x - x_mean);
    }

    if denominator.abs() < 1e-10 {
        return Err(TrendError::Computation(
            "Cannot calculate slope: x values are too similar".to_string(),
        ));
    }

    Ok(numerator / denominator)
}

/// Trend-decay model state for a single projection run
#[derive(Debug, Clone)]
pub struct TrendDecayModel {
    anchor: f64,
    slope: f64,
    horizon: usize,
    seasonal_amplitude: f64,
}

impl TrendDecayModel {
    /// Build a model anchored at the last observation.
    ///
    /// A window too short to fit a line yields a flat (zero-slope) model
    /// rather than an error; an empty history is handled by the caller
    /// supplying a default anchor.
    pub fn fit(anchor: f64, window: &[f64], horizon: usize, seasonal_amplitude: f64) -> Self {
        let slope = linear_slope(window).unwrap_or(0.0);

        Self {
            anchor,
            slope,
            horizon: horizon.max(1),
            seasonal_amplitude,
        }
    }

    /// Raw (pre-noise, pre-clamp) value for the 1-based projection step.
    pub fn value_at(&self, step: usize, days_from_start: f64) -> f64 {
        let step_f = step as f64;
        let horizon_f = self.horizon as f64;

        // Trend influence decays linearly to zero across twice the horizon
        let trend_effect = self.slope * step_f * (1.0 - step_f / (horizon_f * 2.0));
        let seasonal = self.seasonal_amplitude * (days_from_start * 2.0 * PI / DAYS_PER_YEAR).sin();

        self.anchor + trend_effect + seasonal
    }

    /// Noise attenuation for the 1-based projection step, falling to zero at
    /// the end of the horizon.
    pub fn noise_factor(&self, step: usize) -> f64 {
        (1.0 - step as f64 / self.horizon as f64).max(0.0)
    }

    /// Fitted slope.
    pub fn slope(&self) -> f64 {
        self.slope
    }
}
