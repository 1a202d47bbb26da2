//! Interest time series handling

use crate::error::{Result, TrendError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered sequence of (date, interest value) samples.
///
/// Values are a unitless popularity score conventionally on a 0-100 scale.
/// Dates are required to be non-decreasing; constructors and `push` enforce
/// this so downstream code can rely on ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl InterestSeries {
    /// Create a series from parallel date and value vectors.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(TrendError::InvalidParameter(format!(
                "Dates length ({}) doesn't match values length ({})",
                dates.len(),
                values.len()
            )));
        }

        if dates.windows(2).any(|w| w[1] < w[0]) {
            return Err(TrendError::InvalidParameter(
                "Dates must be non-decreasing".to_string(),
            ));
        }

        Ok(Self { dates, values })
    }

    /// Create a series from (date, value) samples.
    pub fn from_samples(samples: Vec<(NaiveDate, f64)>) -> Result<Self> {
        let (dates, values) = samples.into_iter().unzip();
        Self::new(dates, values)
    }

    /// Create an empty series.
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Append a sample, preserving date ordering.
    pub fn push(&mut self, date: NaiveDate, value: f64) -> Result<()> {
        if let Some(last) = self.dates.last() {
            if date < *last {
                return Err(TrendError::InvalidParameter(format!(
                    "Sample date {} precedes last date {}",
                    date, last
                )));
            }
        }

        self.dates.push(date);
        self.values.push(value);
        Ok(())
    }

    /// Get the sample dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Get the sample values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the last sample, if any.
    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        match (self.dates.last(), self.values.last()) {
            (Some(d), Some(v)) => Some((*d, *v)),
            _ => None,
        }
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Get the length of the series.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Maximum value in the series, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
    }

    /// Arithmetic mean of all values, if any.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }

        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Arithmetic mean of the most recent `min(window, len)` values.
    pub fn recent_mean(&self, window: usize) -> Option<f64> {
        if self.values.is_empty() || window == 0 {
            return None;
        }

        let take = window.min(self.values.len());
        let recent = &self.values[self.values.len() - take..];
        Some(recent.iter().sum::<f64>() / take as f64)
    }

    /// The most recent `min(window, len)` values.
    pub fn recent_values(&self, window: usize) -> &[f64] {
        let take = window.min(self.values.len());
        &self.values[self.values.len() - take..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let result = InterestSeries::new(vec![date("2024-01-01")], vec![10.0, 20.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_decreasing_dates() {
        let result = InterestSeries::new(
            vec![date("2024-02-01"), date("2024-01-01")],
            vec![10.0, 20.0],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_push_preserves_ordering() {
        let mut series = InterestSeries::empty();
        series.push(date("2024-01-01"), 40.0).unwrap();
        series.push(date("2024-02-01"), 45.0).unwrap();
        assert!(series.push(date("2023-12-01"), 50.0).is_err());
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_recent_mean_uses_trailing_window() {
        let series = InterestSeries::new(
            vec![
                date("2024-01-01"),
                date("2024-02-01"),
                date("2024-03-01"),
                date("2024-04-01"),
            ],
            vec![10.0, 20.0, 30.0, 40.0],
        )
        .unwrap();

        assert_eq!(series.recent_mean(2), Some(35.0));
        // Window larger than the series falls back to all values
        assert_eq!(series.recent_mean(10), Some(25.0));
        assert_eq!(InterestSeries::empty().recent_mean(12), None);
    }

    #[test]
    fn test_max_and_last() {
        let series = InterestSeries::new(
            vec![date("2024-01-01"), date("2024-02-01")],
            vec![70.0, 30.0],
        )
        .unwrap();

        assert_eq!(series.max_value(), Some(70.0));
        assert_eq!(series.last(), Some((date("2024-02-01"), 30.0)));
    }
}
