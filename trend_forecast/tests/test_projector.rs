use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use trend_forecast::projector::{ProjectionRequest, Projector, ProjectorConfig};
use trend_forecast::series::InterestSeries;
use trend_forecast::{PredictionStrategy, TrendDirection, TrendError};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn monthly_history(start: &str, values: &[f64]) -> InterestSeries {
    let start = date(start);
    let samples = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (start + chrono::Duration::days(30 * i as i64), v))
        .collect();
    InterestSeries::from_samples(samples).unwrap()
}

#[test]
fn test_sample_count_never_exceeds_cap() {
    let historical = monthly_history("2020-01-01", &[40.0, 45.0, 50.0, 55.0]);
    let projector = Projector::with_defaults();

    // A 40-year range would step far past the cap
    let request = ProjectionRequest {
        keyword: "solar panels",
        historical: &historical,
        range_start: date("2021-01-01"),
        range_end: date("2061-01-01"),
    };

    let mut rng = StdRng::seed_from_u64(1);
    let projection = projector.project(&request, &mut rng).unwrap();

    assert_eq!(projection.series.len(), 50);
}

#[test]
fn test_projected_values_stay_in_bounds() {
    let projector = Projector::with_defaults();

    for (seed, keyword) in [(1u64, "AI assistants"), (2, "crypto wallet"), (3, "gardening")] {
        let historical = monthly_history("2023-01-01", &[90.0, 95.0, 100.0, 98.0]);
        let request = ProjectionRequest {
            keyword,
            historical: &historical,
            range_start: date("2023-06-01"),
            range_end: date("2033-06-01"),
        };

        let mut rng = StdRng::seed_from_u64(seed);
        let projection = projector.project(&request, &mut rng).unwrap();

        // Connection point aside, every value is clamped to [5, 100]
        for &value in &projection.series.values()[1..] {
            assert!((5.0..=100.0).contains(&value), "{} out of bounds", value);
        }
    }
}

#[test]
fn test_empty_history_projects_from_default_baseline() {
    let historical = InterestSeries::empty();
    let projector = Projector::with_defaults();
    let request = ProjectionRequest {
        keyword: "quiet hobbies",
        historical: &historical,
        range_start: date("2025-01-01"),
        range_end: date("2026-01-01"),
    };

    let mut rng = StdRng::seed_from_u64(9);
    let projection = projector.project(&request, &mut rng).unwrap();

    assert!(!projection.series.is_empty());
    assert_eq!(projection.summary.max_interest, 0.0);
    assert_eq!(projection.summary.avg_interest, 0.0);
    assert_eq!(projection.summary.peak_date, None);
    assert_eq!(projection.summary.trend_direction, TrendDirection::Stable);
    // No history means no connection point; first sample is range_start
    assert_eq!(projection.series.dates()[0], date("2025-01-01"));
}

#[test]
fn test_connection_point_echoes_last_historical_sample() {
    let historical = monthly_history("2024-01-01", &[40.0, 45.0, 62.0]);
    let projector = Projector::with_defaults();
    let request = ProjectionRequest {
        keyword: "houseplants",
        historical: &historical,
        range_start: date("2024-06-01"),
        range_end: date("2025-06-01"),
    };

    let mut rng = StdRng::seed_from_u64(4);
    let projection = projector.project(&request, &mut rng).unwrap();

    let (first_date, first_value) = (projection.series.dates()[0], projection.series.values()[0]);
    assert_eq!((first_date, first_value), historical.last().unwrap());
}

#[test]
fn test_seeded_projection_is_reproducible() {
    let historical = monthly_history("2023-01-01", &[30.0, 35.0, 40.0, 45.0, 50.0]);
    let projector = Projector::with_defaults();
    let request = ProjectionRequest {
        keyword: "digital art",
        historical: &historical,
        range_start: date("2023-06-01"),
        range_end: date("2025-06-01"),
    };

    let a = projector
        .project(&request, &mut StdRng::seed_from_u64(42))
        .unwrap();
    let b = projector
        .project(&request, &mut StdRng::seed_from_u64(42))
        .unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_reversed_range_is_rejected() {
    let historical = monthly_history("2023-01-01", &[30.0, 35.0]);
    let projector = Projector::with_defaults();
    let request = ProjectionRequest {
        keyword: "anything",
        historical: &historical,
        range_start: date("2024-06-01"),
        range_end: date("2024-01-01"),
    };

    let result = projector.project(&request, &mut StdRng::seed_from_u64(0));
    assert!(matches!(result, Err(TrendError::InvalidDateRange(_))));
}

#[test]
fn test_range_must_follow_history() {
    let historical = monthly_history("2024-01-01", &[30.0, 35.0, 40.0]);
    let projector = Projector::with_defaults();
    let request = ProjectionRequest {
        keyword: "anything",
        historical: &historical,
        range_start: date("2024-01-15"),
        range_end: date("2025-01-15"),
    };

    let result = projector.project(&request, &mut StdRng::seed_from_u64(0));
    assert!(matches!(result, Err(TrendError::InvalidDateRange(_))));
}

#[test]
fn test_trend_decay_strategy_follows_recent_slope() {
    let mut config = ProjectorConfig::default();
    config.strategy = PredictionStrategy::TrendDecay;
    config.connect_to_history = false;
    let projector = Projector::new(config).unwrap();

    // Strongly rising window
    let historical = monthly_history("2023-01-01", &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
    let request = ProjectionRequest {
        keyword: "board games",
        historical: &historical,
        range_start: date("2023-07-01"),
        range_end: date("2024-07-01"),
    };

    let projection = projector
        .project(&request, &mut StdRng::seed_from_u64(11))
        .unwrap();

    // Early projection continues above the last observation
    assert!(projection.series.values()[0] > 55.0);
    for &value in projection.series.values() {
        assert!((5.0..=100.0).contains(&value));
    }
}

#[test]
fn test_summary_covers_both_series() {
    let historical = monthly_history("2023-01-01", &[10.0, 10.0, 10.0, 50.0, 50.0, 50.0]);
    let projector = Projector::with_defaults();
    let request = ProjectionRequest {
        keyword: "cooking recipes",
        historical: &historical,
        range_start: date("2023-07-01"),
        range_end: date("2024-07-01"),
    };

    let projection = projector
        .project(&request, &mut StdRng::seed_from_u64(5))
        .unwrap();

    assert_eq!(projection.summary.max_interest, 50.0);
    assert_eq!(projection.summary.avg_interest, 30.0);
    assert_eq!(projection.summary.peak_date, Some(date("2023-04-01")));
    assert_eq!(projection.summary.trend_direction, TrendDirection::Rising);
    assert!(projection.summary.max_prediction >= projection.summary.avg_prediction);
    assert!(projection.summary.avg_prediction > 0.0);

    // Projection serializes cleanly
    let json = projection.to_json().unwrap();
    assert!(json.contains("trend_direction"));
}
