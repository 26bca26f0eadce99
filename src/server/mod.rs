//! HTTP surface of the service: an `axum` router over [`ClimateService`].

pub mod error;
mod routes;

use crate::climate::{ClimateService, API_PREFIX};
use crate::error::ClimateError;
use axum::routing::get;
use axum::Router;
use log::info;
use std::future::Future;
use tokio::net::TcpListener;

/// Builds the router for all API routes, sharing `service` with every handler.
///
/// Literal routes (`precipitation`, `stations`, `tobs`) take precedence over the
/// `/<start>` capture.
pub fn router(service: ClimateService) -> Router {
    Router::new()
        .route("/", get(routes::welcome))
        .route(
            &format!("{API_PREFIX}/precipitation"),
            get(routes::precipitation),
        )
        .route(&format!("{API_PREFIX}/stations"), get(routes::stations))
        .route(&format!("{API_PREFIX}/tobs"), get(routes::tobs))
        .route(
            &format!("{API_PREFIX}/:start"),
            get(routes::temperature_since),
        )
        .route(
            &format!("{API_PREFIX}/:start/:end"),
            get(routes::temperature_between),
        )
        .with_state(service)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    service: ClimateService,
    shutdown: F,
) -> Result<(), ClimateError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(address) = listener.local_addr() {
        info!("Listening on http://{}", address);
    }
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ClimateError::Serve)
}
