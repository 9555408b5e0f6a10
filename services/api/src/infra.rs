use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use usestage_carbon::config::BuildingConfig;
use usestage_carbon::error::AppError;
use usestage_carbon::reporting::{Dashboard, Section};
use usestage_carbon::sources::DataSource;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) source: Arc<dyn DataSource>,
    pub(crate) building: BuildingConfig,
}

impl AppState {
    /// Refetches the three tables and hands the dashboard to `view`.
    ///
    /// Store reads are blocking, so the whole pass runs on the blocking pool.
    pub(crate) async fn with_dashboard<T, F>(&self, view: F) -> Result<T, AppError>
    where
        F: FnOnce(&Dashboard) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let source = Arc::clone(&self.source);
        let building = self.building;

        tokio::task::spawn_blocking(move || {
            let dashboard = Dashboard::new(source.load_dataset()?, building)?;
            view(&dashboard)
        })
        .await
        .map_err(|err| AppError::Io(std::io::Error::other(err)))?
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    #[serde(default)]
    pub(crate) section: Option<String>,
    #[serde(default)]
    pub(crate) year: Option<i32>,
}

impl DashboardQuery {
    pub(crate) fn section(&self) -> Result<Section, AppError> {
        match self.section.as_deref() {
            Some(raw) => Ok(raw.parse::<Section>()?),
            None => Ok(Section::default()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct YearQuery {
    #[serde(default)]
    pub(crate) year: Option<i32>,
}

/// Maps axum's plain-text query rejection onto the JSON error body.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

pub(crate) fn parse_section(raw: &str) -> Result<Section, String> {
    raw.parse::<Section>().map_err(|err| err.to_string())
}
