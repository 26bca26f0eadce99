use crate::climate::ClimateService;
use crate::error::ClimateError;
use crate::server::error::ApiError;
use crate::types::observation::{PrecipitationByDate, TemperatureObservation, TemperatureSummary};
use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use log::debug;

/// Runs a query on the blocking pool; Polars work must not stall the async workers.
async fn run_query<T, F>(service: ClimateService, query: F) -> Result<T, ClimateError>
where
    T: Send + 'static,
    F: FnOnce(&ClimateService) -> Result<T, ClimateError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || query(&service)).await?
}

pub(crate) async fn welcome() -> Html<String> {
    Html(ClimateService::list_routes())
}

pub(crate) async fn precipitation(
    State(service): State<ClimateService>,
) -> Result<Json<PrecipitationByDate>, ApiError> {
    let precipitation = run_query(service, |s| s.precipitation()).await?;
    debug!("precipitation: {} dates", precipitation.len());
    Ok(Json(precipitation))
}

pub(crate) async fn stations(
    State(service): State<ClimateService>,
) -> Result<Json<Vec<String>>, ApiError> {
    let stations = run_query(service, |s| s.station_ids()).await?;
    debug!("stations: {} ids", stations.len());
    Ok(Json(stations))
}

pub(crate) async fn tobs(
    State(service): State<ClimateService>,
) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    let observations = run_query(service, |s| s.most_active_temperatures()).await?;
    debug!("tobs: {} observations", observations.len());
    Ok(Json(observations))
}

pub(crate) async fn temperature_since(
    State(service): State<ClimateService>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    debug!("temperature summary since {:?}", start);
    let summary = run_query(service, move |s| s.temperature_since(&start)).await?;
    Ok(Json(summary))
}

pub(crate) async fn temperature_between(
    State(service): State<ClimateService>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    debug!("temperature summary from {:?} to {:?}", start, end);
    let summary = run_query(service, move |s| s.temperature_between(&start, &end)).await?;
    Ok(Json(summary))
}
