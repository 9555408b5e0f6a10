use crate::infra::{query_params, AppState, DashboardQuery, YearQuery};
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;
use serde_json::json;
use tracing::warn;
use usestage_carbon::error::AppError;
use usestage_carbon::reporting::{CostTable, DashboardView, HistoricalRow, RenewablesRow};

#[derive(Debug, Serialize)]
pub(crate) struct YearsResponse {
    pub(crate) years: Vec<i32>,
    pub(crate) baseline_year: i32,
}

#[derive(Debug, Serialize)]
pub(crate) struct CostTableResponse {
    pub(crate) year: i32,
    #[serde(flatten)]
    pub(crate) table: CostTable,
}

pub(crate) fn dashboard_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/dashboard", get(dashboard_endpoint))
        .route("/api/v1/years", get(years_endpoint))
        .route("/api/v1/tables/historical", get(historical_endpoint))
        .route("/api/v1/tables/renewables", get(renewables_endpoint))
        .route("/api/v1/tables/cost", get(cost_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn dashboard_endpoint(
    Extension(state): Extension<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<DashboardView>, AppError> {
    let query = query_params(query)?;
    let section = query.section()?;
    let year = query.year;

    let view = state
        .with_dashboard(move |dashboard| {
            dashboard
                .render(section, year)
                .inspect_err(|err| warn!(%section, ?year, error = %err, "render failed"))
                .map_err(AppError::from)
        })
        .await?;
    Ok(Json(view))
}

pub(crate) async fn years_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<YearsResponse>, AppError> {
    let years = state
        .with_dashboard(|dashboard| {
            Ok(YearsResponse {
                years: dashboard.years(),
                baseline_year: dashboard.baseline_year(),
            })
        })
        .await?;
    Ok(Json(years))
}

pub(crate) async fn historical_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<HistoricalRow>>, AppError> {
    let rows = state
        .with_dashboard(|dashboard| Ok(dashboard.historical_table()))
        .await?;
    Ok(Json(rows))
}

pub(crate) async fn renewables_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<RenewablesRow>>, AppError> {
    let rows = state
        .with_dashboard(|dashboard| Ok(dashboard.renewables_table()))
        .await?;
    Ok(Json(rows))
}

pub(crate) async fn cost_endpoint(
    Extension(state): Extension<AppState>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Result<Json<CostTableResponse>, AppError> {
    let requested = query_params(query)?.year;

    let response = state
        .with_dashboard(move |dashboard| {
            let year = requested.unwrap_or_else(|| dashboard.latest_year());
            let table = dashboard.cost_table(year)?;
            Ok(CostTableResponse { year, table })
        })
        .await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;
    use usestage_carbon::config::BuildingConfig;
    use usestage_carbon::reporting::{Category, Dataset};
    use usestage_carbon::sources::{DataSource, InMemorySource};

    fn app_with(source: impl DataSource + 'static) -> Router {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(handle),
            source: Arc::new(source),
            building: BuildingConfig::default(),
        };
        dashboard_routes().layer(Extension(state))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn dashboard_defaults_to_overview_of_latest_year() {
        let (status, body) =
            get_json(app_with(InMemorySource::sample()), "/api/v1/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["section"], "overview");
        assert_eq!(body["year"], 2024);
        assert_eq!(body["baseline_year"], 2020);
        assert_eq!(body["body"]["kind"], "overview");
        assert_eq!(body["data_sources"].as_array().map(Vec::len), Some(6));
    }

    #[tokio::test]
    async fn dashboard_accepts_section_and_year() {
        let (status, body) = get_json(
            app_with(InMemorySource::sample()),
            "/api/v1/dashboard?section=comfort&year=2023",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["year"], 2023);
        assert_eq!(body["body"]["indicators"]["year"], 2023);
    }

    #[tokio::test]
    async fn unknown_section_is_a_bad_request() {
        let (status, body) = get_json(
            app_with(InMemorySource::sample()),
            "/api/v1/dashboard?section=finance",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("finance")));
    }

    #[tokio::test]
    async fn malformed_year_is_a_json_bad_request() {
        let app = app_with(InMemorySource::sample());
        let (status, body) = get_json(app.clone(), "/api/v1/dashboard?year=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.starts_with("bad request")));

        let (status, body) = get_json(app, "/api/v1/tables/cost?year=20x4").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn comfort_gap_leaves_other_sections_available() {
        let mut dataset = InMemorySource::sample().into_dataset();
        dataset.comfort[4].iaq_score = 100.5;
        let app = app_with(InMemorySource::new(dataset));

        let (status, _) = get_json(app.clone(), "/api/v1/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = get_json(app, "/api/v1/dashboard?section=comfort").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_year_is_not_found() {
        let (status, _) = get_json(
            app_with(InMemorySource::sample()),
            "/api/v1/dashboard?year=1990",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_store_reports_data_unavailable() {
        let (status, body) = get_json(
            app_with(InMemorySource::new(Dataset::default())),
            "/api/v1/years",
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "no data found in yearly_data table");
    }

    #[tokio::test]
    async fn years_lists_newest_first() {
        let (status, body) = get_json(app_with(InMemorySource::sample()), "/api/v1/years").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["years"], json!([2024, 2023, 2022, 2021, 2020]));
        assert_eq!(body["baseline_year"], 2020);
    }

    #[tokio::test]
    async fn historical_and_renewables_tables_are_ascending() {
        let app = app_with(InMemorySource::sample());
        let (status, historical) = get_json(app.clone(), "/api/v1/tables/historical").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(historical[0]["year"], 2020);

        let (status, renewables) = get_json(app, "/api/v1/tables/renewables").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(renewables.as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn cost_table_reports_missing_rate() {
        let mut dataset = InMemorySource::sample().into_dataset();
        dataset
            .cost_rates
            .retain(|rate| rate.category != Category::Water);

        let (status, body) =
            get_json(app_with(InMemorySource::new(dataset)), "/api/v1/tables/cost").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "no cost rate configured for the water category");
    }

    #[tokio::test]
    async fn cost_table_defaults_to_latest_year() {
        let (status, body) =
            get_json(app_with(InMemorySource::sample()), "/api/v1/tables/cost").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["year"], 2024);
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(handle),
            source: Arc::new(InMemorySource::sample()),
            building: BuildingConfig::default(),
        };
        let app = dashboard_routes().layer(Extension(state));

        let (status, body) = get_json(app, "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");
    }
}
