//! Growth models for synthetic interest projection

use crate::error::{Result, TrendError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub mod trend_decay;

/// Days per year used for all date-offset arithmetic.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Prediction strategy applied by the projector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStrategy {
    /// Keyword-conditioned growth profile with seasonality
    KeywordProfile,
    /// Linear-trend slope with influence decaying over the horizon
    TrendDecay,
}

impl Default for PredictionStrategy {
    fn default() -> Self {
        PredictionStrategy::KeywordProfile
    }
}

/// Growth profile selected from the request keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthProfile {
    /// Saturating exponential growth (AI-related keywords)
    Saturating,
    /// Faster linear growth with a strong annual cycle (tech keywords)
    Cyclical,
    /// Moderate linear growth with mild seasonality (everything else)
    Seasonal,
}

const SATURATING_MARKERS: [&str; 2] = ["AI", "ARTIFICIAL INTELLIGENCE"];
const CYCLICAL_MARKERS: [&str; 4] = ["TECH", "DIGITAL", "CRYPTO", "BLOCKCHAIN"];

impl GrowthProfile {
    /// Classify a keyword by case-insensitive substring matching.
    pub fn classify(keyword: &str) -> Self {
        let upper = keyword.to_uppercase();

        if SATURATING_MARKERS.iter().any(|m| upper.contains(m)) {
            GrowthProfile::Saturating
        } else if CYCLICAL_MARKERS.iter().any(|m| upper.contains(m)) {
            GrowthProfile::Cyclical
        } else {
            GrowthProfile::Seasonal
        }
    }

    /// Raw (pre-noise, pre-clamp) projected value at the given day offset.
    pub fn value_at(&self, baseline: f64, days_from_start: f64, params: &GrowthParams) -> f64 {
        let years_from_start = days_from_start / DAYS_PER_YEAR;
        let annual_phase = (days_from_start * 2.0 * PI / DAYS_PER_YEAR).sin();

        match self {
            GrowthProfile::Saturating => {
                let growth = 1.5 * (1.0 - (-years_from_start / 2.0).exp());
                baseline * (1.0 + growth * params.ai_growth_scale)
            }
            GrowthProfile::Cyclical => {
                let trend = baseline * (1.0 + params.tech_growth_rate * years_from_start);
                trend + params.cycle_amplitude * annual_phase
            }
            GrowthProfile::Seasonal => {
                let trend = baseline * (1.0 + params.general_growth_rate * years_from_start);
                trend + params.seasonal_amplitude * annual_phase
            }
        }
    }
}

/// Tunable parameters for the keyword growth profiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthParams {
    /// Multiplier applied to the saturating growth factor
    pub ai_growth_scale: f64,
    /// Annual linear growth rate for tech keywords
    pub tech_growth_rate: f64,
    /// Annual linear growth rate for general keywords
    pub general_growth_rate: f64,
    /// Annual oscillation amplitude for tech keywords
    pub cycle_amplitude: f64,
    /// Annual oscillation amplitude for general keywords
    pub seasonal_amplitude: f64,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            ai_growth_scale: 1.0,
            tech_growth_rate: 0.05,
            general_growth_rate: 0.02,
            cycle_amplitude: 15.0,
            seasonal_amplitude: 10.0,
        }
    }
}

impl GrowthParams {
    /// Validate parameter relationships.
    pub fn validate(&self) -> Result<()> {
        if self.tech_growth_rate <= self.general_growth_rate {
            return Err(TrendError::InvalidParameter(format!(
                "Tech growth rate ({}) must exceed general growth rate ({})",
                self.tech_growth_rate, self.general_growth_rate
            )));
        }
        if self.ai_growth_scale < 0.0 {
            return Err(TrendError::InvalidParameter(
                "AI growth scale must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("AI tools", GrowthProfile::Saturating)]
    #[case("artificial intelligence research", GrowthProfile::Saturating)]
    #[case("Bitcoin Crypto Price", GrowthProfile::Cyclical)]
    #[case("blockchain gaming", GrowthProfile::Cyclical)]
    #[case("digital nomad", GrowthProfile::Cyclical)]
    #[case("Cooking recipes", GrowthProfile::Seasonal)]
    #[case("garden furniture", GrowthProfile::Seasonal)]
    fn test_classify_keyword(#[case] keyword: &str, #[case] expected: GrowthProfile) {
        assert_eq!(GrowthProfile::classify(keyword), expected);
    }

    #[test]
    fn test_saturating_growth_plateaus() {
        let params = GrowthParams::default();
        let near = GrowthProfile::Saturating.value_at(50.0, 0.0, &params);
        let mid = GrowthProfile::Saturating.value_at(50.0, 2.0 * DAYS_PER_YEAR, &params);
        let far = GrowthProfile::Saturating.value_at(50.0, 20.0 * DAYS_PER_YEAR, &params);

        assert!((near - 50.0).abs() < 1e-9);
        assert!(mid > near);
        assert!(far > mid);
        // Saturates below baseline * (1 + 1.5)
        assert!(far < 50.0 * 2.5 + 1e-9);
    }

    #[test]
    fn test_cyclical_outgrows_seasonal() {
        let params = GrowthParams::default();
        // One full year, so the oscillation term is at phase zero for both
        let days = DAYS_PER_YEAR;
        let tech = GrowthProfile::Cyclical.value_at(50.0, days, &params);
        let general = GrowthProfile::Seasonal.value_at(50.0, days, &params);
        assert!(tech > general);
    }

    #[test]
    fn test_params_validation() {
        let mut params = GrowthParams::default();
        params.tech_growth_rate = 0.01;
        assert!(params.validate().is_err());

        let mut params = GrowthParams::default();
        params.ai_growth_scale = -0.5;
        assert!(params.validate().is_err());

        assert!(GrowthParams::default().validate().is_ok());
    }
}
