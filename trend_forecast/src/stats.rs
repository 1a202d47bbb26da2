//! Summary statistics over historical and projected series

use crate::series::InterestSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative change (percent) separating Rising/Declining from Stable
const TREND_THRESHOLD_PERCENT: f64 = 10.0;

/// Coarse label for the historical trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Rising,
    Declining,
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Rising => write!(f, "Rising"),
            TrendDirection::Declining => write!(f, "Declining"),
            TrendDirection::Stable => write!(f, "Stable"),
        }
    }
}

/// Derived statistics for a projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Maximum historical interest (0 when no history)
    pub max_interest: f64,
    /// Average historical interest (0 when no history)
    pub avg_interest: f64,
    /// Maximum projected interest (0 when no projection)
    pub max_prediction: f64,
    /// Average projected interest (0 when no projection)
    pub avg_prediction: f64,
    /// Date of the first occurrence of the historical maximum
    pub peak_date: Option<NaiveDate>,
    /// Historical trajectory label
    pub trend_direction: TrendDirection,
}

/// Derive summary statistics from the historical and projected series.
///
/// An empty history yields zeroed interest fields and a Stable direction,
/// never an error.
pub fn summarize(historical: &InterestSeries, projected: &InterestSeries) -> Summary {
    let max_interest = historical.max_value().unwrap_or(0.0);
    let avg_interest = historical.mean().map(round1).unwrap_or(0.0);
    let max_prediction = projected.max_value().unwrap_or(0.0);
    let avg_prediction = projected.mean().map(round1).unwrap_or(0.0);

    Summary {
        max_interest,
        avg_interest,
        max_prediction,
        avg_prediction,
        peak_date: peak_date(historical),
        trend_direction: trend_direction(historical.values()),
    }
}

/// Date of the first sample holding the historical maximum, falling back to
/// the last historical date.
pub fn peak_date(historical: &InterestSeries) -> Option<NaiveDate> {
    let max = historical.max_value()?;
    let values = historical.values();
    let dates = historical.dates();

    let peak_index = values.iter().position(|v| *v == max);
    match peak_index {
        Some(i) if i < dates.len() => Some(dates[i]),
        _ => dates.last().copied(),
    }
}

/// Label the trajectory by comparing first-half and second-half averages.
///
/// The second half must differ from the first by more than 10% (relative)
/// to count as Rising or Declining.
pub fn trend_direction(values: &[f64]) -> TrendDirection {
    if values.len() < 2 {
        return TrendDirection::Stable;
    }

    let mid = values.len() / 2;
    let first_avg = values[..mid].iter().sum::<f64>() / mid as f64;
    let second_avg = values[mid..].iter().sum::<f64>() / (values.len() - mid) as f64;

    if first_avg == 0.0 {
        return if second_avg > 0.0 {
            TrendDirection::Rising
        } else {
            TrendDirection::Stable
        };
    }

    let change_percent = (second_avg - first_avg) / first_avg * 100.0;
    if change_percent > TREND_THRESHOLD_PERCENT {
        TrendDirection::Rising
    } else if change_percent < -TREND_THRESHOLD_PERCENT {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
