//! The projection engine
//!
//! Turns a historical interest series and a future date range into a
//! synthetic projected series plus summary statistics. Purely computational;
//! acquiring historical data and serving results happen elsewhere.

use crate::error::{Result, TrendError};
use crate::models::trend_decay::TrendDecayModel;
use crate::models::{GrowthParams, GrowthProfile, PredictionStrategy, DAYS_PER_YEAR};
use crate::series::InterestSeries;
use crate::stats::{round1, summarize, Summary};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Hard cap on emitted projection samples, independent of the range length
pub const MAX_PROJECTION_SAMPLES: usize = 50;

/// Tunable parameters for the projector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectorConfig {
    /// Upper bound on projected samples per request
    pub max_samples: usize,
    /// Uniform noise amplitude for the keyword-profile strategy
    pub noise_amplitude: f64,
    /// Initial noise amplitude for the trend-decay strategy
    pub decay_noise_amplitude: f64,
    /// Lower clamp for projected values
    pub value_floor: f64,
    /// Upper clamp for projected values
    pub value_ceiling: f64,
    /// Number of trailing historical values averaged into the baseline
    pub baseline_window: usize,
    /// Baseline when no history exists (midpoint of the 0-100 scale)
    pub default_baseline: f64,
    /// Echo the last historical sample as the first projected sample
    pub connect_to_history: bool,
    /// Prediction strategy
    pub strategy: PredictionStrategy,
    /// Keyword growth profile parameters
    pub growth: GrowthParams,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            max_samples: MAX_PROJECTION_SAMPLES,
            noise_amplitude: 8.0,
            decay_noise_amplitude: 5.0,
            value_floor: 5.0,
            value_ceiling: 100.0,
            baseline_window: 12,
            default_baseline: 50.0,
            connect_to_history: true,
            strategy: PredictionStrategy::KeywordProfile,
            growth: GrowthParams::default(),
        }
    }
}

impl ProjectorConfig {
    /// Validate parameter relationships.
    pub fn validate(&self) -> Result<()> {
        if self.max_samples == 0 {
            return Err(TrendError::InvalidParameter(
                "Max samples must be positive".to_string(),
            ));
        }
        if self.baseline_window == 0 {
            return Err(TrendError::InvalidParameter(
                "Baseline window must be positive".to_string(),
            ));
        }
        if self.value_floor >= self.value_ceiling {
            return Err(TrendError::InvalidParameter(format!(
                "Value floor ({}) must be below ceiling ({})",
                self.value_floor, self.value_ceiling
            )));
        }
        if self.noise_amplitude < 0.0 || self.decay_noise_amplitude < 0.0 {
            return Err(TrendError::InvalidParameter(
                "Noise amplitude must be non-negative".to_string(),
            ));
        }

        self.growth.validate()
    }
}

/// A single projection request
#[derive(Debug, Clone)]
pub struct ProjectionRequest<'a> {
    /// Keyword the series belongs to; drives growth profile selection
    pub keyword: &'a str,
    /// Observed interest values up to the request's end date
    pub historical: &'a InterestSeries,
    /// First future date to project
    pub range_start: NaiveDate,
    /// Last future date to project
    pub range_end: NaiveDate,
}

/// Projected series plus derived statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Synthetic future samples
    pub series: InterestSeries,
    /// Derived statistics over history and projection
    pub summary: Summary,
}

impl Projection {
    /// Serialize the projection to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Choose the sampling interval in days for the given range span.
///
/// Monthly for short horizons, quarterly for medium, semi-annual for long.
pub fn sampling_interval_days(span_days: i64) -> i64 {
    let total_years = span_days as f64 / DAYS_PER_YEAR;

    if total_years <= 2.0 {
        30
    } else if total_years <= 8.0 {
        90
    } else {
        182
    }
}

/// The projection/statistics engine
#[derive(Debug, Clone)]
pub struct Projector {
    config: ProjectorConfig,
}

impl Projector {
    /// Create a projector with validated configuration.
    pub fn new(config: ProjectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a projector with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: ProjectorConfig::default(),
        }
    }

    /// Get the projector configuration.
    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Project future interest values for the request's date range.
    ///
    /// The caller supplies the random source; seeding it makes the output
    /// reproducible. An empty history is fine; only a malformed range errors.
    pub fn project(&self, request: &ProjectionRequest<'_>, rng: &mut impl Rng) -> Result<Projection> {
        self.validate_range(request)?;

        let cfg = &self.config;
        let interval = sampling_interval_days((request.range_end - request.range_start).num_days());

        let baseline = request
            .historical
            .recent_mean(cfg.baseline_window)
            .unwrap_or(cfg.default_baseline);
        let anchor = request
            .historical
            .last()
            .map(|(_, v)| v)
            .unwrap_or(cfg.default_baseline);

        let mut series = InterestSeries::empty();

        // Connection point keeps the two series visually contiguous when
        // charted; it echoes history exactly, so no noise and no clamp.
        if cfg.connect_to_history {
            if let Some((date, value)) = request.historical.last() {
                series.push(date, value)?;
            }
        }

        let profile = GrowthProfile::classify(request.keyword);
        let remaining = cfg.max_samples.saturating_sub(series.len());
        let planned = self.planned_steps(request, interval, remaining);
        let decay = TrendDecayModel::fit(
            anchor,
            request.historical.recent_values(cfg.baseline_window),
            planned,
            cfg.growth.seasonal_amplitude,
        );

        let mut current = request.range_start;
        let mut step = 0usize;

        while current <= request.range_end && series.len() < cfg.max_samples {
            step += 1;
            let days_from_start = (current - request.range_start).num_days() as f64;

            let (raw, noise) = match cfg.strategy {
                PredictionStrategy::KeywordProfile => {
                    let raw = profile.value_at(baseline, days_from_start, &cfg.growth);
                    let noise = rng.gen_range(-cfg.noise_amplitude..=cfg.noise_amplitude);
                    (raw, noise)
                }
                PredictionStrategy::TrendDecay => {
                    let raw = decay.value_at(step, days_from_start);
                    let noise = rng
                        .gen_range(-cfg.decay_noise_amplitude..=cfg.decay_noise_amplitude)
                        * decay.noise_factor(step);
                    (raw, noise)
                }
            };

            let value = round1((raw + noise).clamp(cfg.value_floor, cfg.value_ceiling));
            series.push(current, value)?;

            current += Duration::days(interval);
        }

        let summary = summarize(request.historical, &series);

        Ok(Projection { series, summary })
    }

    fn validate_range(&self, request: &ProjectionRequest<'_>) -> Result<()> {
        if request.range_end < request.range_start {
            return Err(TrendError::InvalidDateRange(format!(
                "Range end ({}) precedes range start ({})",
                request.range_end, request.range_start
            )));
        }

        if let Some((last, _)) = request.historical.last() {
            if request.range_start <= last {
                return Err(TrendError::InvalidDateRange(format!(
                    "Range start ({}) must follow the last historical date ({})",
                    request.range_start, last
                )));
            }
        }

        Ok(())
    }

    /// Number of stepped samples the loop will emit, bounded by the cap.
    fn planned_steps(&self, request: &ProjectionRequest<'_>, interval: i64, remaining: usize) -> usize {
        let span = (request.range_end - request.range_start).num_days();
        let by_range = (span / interval + 1) as usize;
        by_range.min(remaining).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(365, 30)]
    #[case(365 * 5, 90)]
    #[case(365 * 10, 182)]
    #[case(0, 30)]
    fn test_sampling_interval(#[case] span_days: i64, #[case] expected: i64) {
        assert_eq!(sampling_interval_days(span_days), expected);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ProjectorConfig::default();
        config.value_floor = 100.0;
        config.value_ceiling = 5.0;
        assert!(Projector::new(config).is_err());

        let mut config = ProjectorConfig::default();
        config.max_samples = 0;
        assert!(Projector::new(config).is_err());

        assert!(Projector::new(ProjectorConfig::default()).is_ok());
    }
}
