use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::{info, warn};
use trend_forecast::projector::{ProjectionRequest, Projector, ProjectorConfig};
use trend_forecast::{InterestSeries, Projection, TrendError};

use crate::config::{Config, ProviderKind};
use crate::provider::{MockProvider, Provider, SerpApiProvider};

/// Search interest has no meaning before the web-search era.
const EARLIEST_VALID_YEAR: i32 = 1990;
/// Upstream APIs cap how far back a timeseries request may reach.
const UPSTREAM_LOOKBACK_DAYS: i64 = 365 * 5;
/// Historical window defaulted when no start date is supplied.
const DEFAULT_LOOKBACK_DAYS: i64 = 365 * 2;
/// Forward horizon projected past the requested end date.
const PROJECTION_HORIZON_DAYS: i64 = 365 * 2;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub provider: Provider,
    pub projector: Projector,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<SharedState> {
        let provider = match config.provider_kind() {
            ProviderKind::Mock => Provider::Mock(MockProvider),
            ProviderKind::SerpApi => {
                let key_env = config.api_key_env();
                let api_key = std::env::var(&key_env)
                    .map_err(|_| anyhow::anyhow!("SerpAPI key env var {} not set", key_env))?;
                Provider::SerpApi(SerpApiProvider::new(api_key))
            }
        };

        let mut projector_config = ProjectorConfig::default();
        if let Some(projection) = &config.projection {
            if let Some(strategy) = projection.strategy {
                projector_config.strategy = strategy;
            }
            if let Some(scale) = projection.ai_growth_scale {
                projector_config.growth.ai_growth_scale = scale;
            }
            if let Some(connect) = projection.connect_to_history {
                projector_config.connect_to_history = connect;
            }
        }
        let projector = Projector::new(projector_config)?;

        Ok(Arc::new(AppState {
            config,
            provider,
            projector,
        }))
    }
}

pub fn build_router(state: SharedState) -> Router {
    let static_files = ServeDir::new(state.config.static_dir()).append_index_html_on_directories(true);

    Router::new()
        .route("/health", get(health))
        .route("/get_trend_data", get(get_trend_data))
        .fallback_service(static_files)
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

async fn health() -> impl IntoResponse {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Deserialize)]
struct TrendQuery {
    keyword: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

/// Wire contract of the data endpoint
#[derive(Debug, Serialize)]
struct TrendResponse {
    keyword: String,
    date: Vec<String>,
    interest: Vec<f64>,
    prediction_dates: Vec<String>,
    prediction: Vec<f64>,
    max_interest: f64,
    avg_interest: f64,
    max_prediction: f64,
    avg_prediction: f64,
    peak_date: Option<String>,
    trend_direction: String,
    data_points: usize,
    prediction_points: usize,
}

impl TrendResponse {
    fn assemble(keyword: String, historical: &InterestSeries, projection: &Projection) -> Self {
        let summary = &projection.summary;

        Self {
            keyword,
            date: format_dates(historical),
            interest: historical.values().to_vec(),
            prediction_dates: format_dates(&projection.series),
            prediction: projection.series.values().to_vec(),
            max_interest: summary.max_interest,
            avg_interest: summary.avg_interest,
            max_prediction: summary.max_prediction,
            avg_prediction: summary.avg_prediction,
            peak_date: summary.peak_date.map(|d| d.format("%Y-%m-%d").to_string()),
            trend_direction: summary.trend_direction.to_string(),
            data_points: historical.len(),
            prediction_points: projection.series.len(),
        }
    }
}

fn format_dates(series: &InterestSeries) -> Vec<String> {
    series
        .dates()
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect()
}

#[derive(Serialize)]
struct RangeErrorBody {
    error: &'static str,
    message: String,
    keyword: String,
}

/// Degraded payload for unexpected faults: the chart-facing arrays are
/// present but empty so the page renders instead of breaking.
#[derive(Serialize)]
struct DegradedBody {
    error: &'static str,
    message: String,
    keyword: String,
    date: Vec<String>,
    interest: Vec<f64>,
    prediction_dates: Vec<String>,
    prediction: Vec<f64>,
}

fn invalid_range(keyword: &str, message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(RangeErrorBody {
            error: "Invalid date range",
            message: message.into(),
            keyword: keyword.to_string(),
        }),
    )
        .into_response()
}

fn degraded(keyword: &str, message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(DegradedBody {
            error: "Failed to fetch trend data",
            message: message.into(),
            keyword: keyword.to_string(),
            date: Vec::new(),
            interest: Vec::new(),
            prediction_dates: Vec::new(),
            prediction: Vec::new(),
        }),
    )
        .into_response()
}

async fn get_trend_data(
    State(state): State<SharedState>,
    Query(query): Query<TrendQuery>,
) -> Response {
    let keyword = query
        .keyword
        .unwrap_or_else(|| state.config.default_keyword());
    let today = Utc::now().date_naive();

    let start = match parse_date(query.start_date.as_deref()) {
        Ok(Some(d)) => d,
        Ok(None) => today - Duration::days(DEFAULT_LOOKBACK_DAYS),
        Err(msg) => return invalid_range(&keyword, msg),
    };
    let end = match parse_date(query.end_date.as_deref()) {
        Ok(Some(d)) => d,
        Ok(None) => today,
        Err(msg) => return invalid_range(&keyword, msg),
    };

    let earliest = NaiveDate::from_ymd_opt(EARLIEST_VALID_YEAR, 1, 1).unwrap_or(NaiveDate::MIN);
    if start < earliest {
        return invalid_range(
            &keyword,
            "Search trends data is not available before 1990. Please select a start date after January 1, 1990.",
        );
    }
    if end < earliest {
        return invalid_range(
            &keyword,
            "Search trends data is not available before 1990. Please select an end date after January 1, 1990.",
        );
    }
    if start > today {
        return invalid_range(
            &keyword,
            "Start date cannot be in the future. Please select a valid start date.",
        );
    }
    if end < start {
        return invalid_range(
            &keyword,
            "End date must be after start date. Please check your date selection.",
        );
    }

    // Upstream APIs reject timeframes reaching too far back; clamp quietly.
    let fetch_start = start.max(today - Duration::days(UPSTREAM_LOOKBACK_DAYS));

    info!(%keyword, %fetch_start, %end, "fetching historical interest");
    let historical = match state.provider.fetch(&keyword, fetch_start, end).await {
        Ok(series) => series,
        Err(e) => {
            warn!(%keyword, error = %e, "upstream fetch failed; continuing with empty history");
            InterestSeries::empty()
        }
    };

    let prediction_start = end + Duration::days(1);
    let request = ProjectionRequest {
        keyword: &keyword,
        historical: &historical,
        range_start: prediction_start,
        range_end: prediction_start + Duration::days(PROJECTION_HORIZON_DAYS),
    };

    let mut rng = StdRng::from_entropy();
    match state.projector.project(&request, &mut rng) {
        Ok(projection) => {
            Json(TrendResponse::assemble(keyword, &historical, &projection)).into_response()
        }
        Err(TrendError::InvalidDateRange(msg)) => invalid_range(&keyword, msg),
        Err(e) => {
            warn!(%keyword, error = %e, "projection failed");
            degraded(&keyword, e.to_string())
        }
    }
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| format!("Invalid date '{}'. Expected YYYY-MM-DD.", s)),
    }
}
