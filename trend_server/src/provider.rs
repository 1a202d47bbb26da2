//! Historical interest data providers
//!
//! One `fetch` surface, two independent implementations: a real Google
//! Trends fetch through SerpAPI and a deterministic mock generator for demo
//! deployments and tests. Selection happens in configuration, not at
//! request time.

use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::hash_map::DefaultHasher;
use std::f64::consts::PI;
use std::hash::{Hash, Hasher};
use tracing::debug;
use trend_forecast::InterestSeries;

#[derive(Debug, Clone)]
pub enum Provider {
    Mock(MockProvider),
    SerpApi(SerpApiProvider),
}

impl Provider {
    /// Fetch the historical interest series for a keyword and date range.
    pub async fn fetch(
        &self,
        keyword: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<InterestSeries> {
        match self {
            Provider::Mock(p) => p.fetch(keyword, start, end),
            Provider::SerpApi(p) => p.fetch(keyword, start, end).await,
        }
    }
}

/// Synthesizes a plausible monthly interest series.
///
/// Seeded from the request parameters so identical requests return identical
/// historical data.
#[derive(Debug, Clone, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn fetch(
        &self,
        keyword: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<InterestSeries> {
        let mut rng = StdRng::seed_from_u64(request_seed(keyword, start, end));

        let base = rng.gen_range(20..60) as f64;
        let drift = rng.gen_range(-0.5..=0.5);

        let mut series = InterestSeries::empty();
        let mut current = start;

        while current <= end {
            let months_since_start = (current - start).num_days() as f64 / 30.44;
            let seasonal = 15.0 * (2.0 * PI * months_since_start / 12.0).sin();
            let noise = rng.gen_range(-10.0..=10.0);

            let value = (base + seasonal + noise + drift * months_since_start)
                .clamp(0.0, 100.0)
                .round();
            series.push(current, value)?;

            current += Duration::days(30);
        }

        debug!(%keyword, points = series.len(), "synthesized mock interest series");
        Ok(series)
    }
}

fn request_seed(keyword: &str, start: NaiveDate, end: NaiveDate) -> u64 {
    let mut hasher = DefaultHasher::new();
    keyword.hash(&mut hasher);
    start.hash(&mut hasher);
    end.hash(&mut hasher);
    hasher.finish()
}

/// Google Trends timeseries through SerpAPI
#[derive(Debug, Clone)]
pub struct SerpApiProvider {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    interest_over_time: Option<InterestOverTime>,
}

#[derive(Debug, Deserialize)]
struct InterestOverTime {
    #[serde(default)]
    timeline_data: Vec<TimelineItem>,
}

#[derive(Debug, Deserialize)]
struct TimelineItem {
    /// Unix seconds, as a string
    timestamp: Option<String>,
    #[serde(default)]
    values: Vec<TimelineValue>,
}

#[derive(Debug, Deserialize)]
struct TimelineValue {
    extracted_value: Option<f64>,
}

impl SerpApiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    pub async fn fetch(
        &self,
        keyword: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<InterestSeries> {
        let timeframe = format!("{} {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"));
        let response = self
            .client
            .get("https://serpapi.com/search")
            .query(&[
                ("engine", "google_trends"),
                ("q", keyword),
                ("date", timeframe.as_str()),
                ("data_type", "TIMESERIES"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("SerpAPI request failed")?
            .error_for_status()
            .context("SerpAPI returned an error status")?;

        let body: SerpResponse = response.json().await.context("malformed SerpAPI payload")?;

        let timeline = body
            .interest_over_time
            .map(|i| i.timeline_data)
            .unwrap_or_default();

        let mut samples: Vec<(NaiveDate, f64)> = timeline
            .into_iter()
            .filter_map(|item| {
                let ts: i64 = item.timestamp?.parse().ok()?;
                let date = DateTime::from_timestamp(ts, 0)?.date_naive();
                let value = item.values.first()?.extracted_value?;
                Some((date, value))
            })
            .collect();
        samples.sort_by_key(|(date, _)| *date);

        debug!(%keyword, points = samples.len(), "fetched SerpAPI interest series");
        Ok(InterestSeries::from_samples(samples)?)
    }
}
