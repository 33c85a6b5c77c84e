//! HTTP handlers for the PetStats server.

use actix_web::{HttpResponse, Responder, get, web};
use log::{error, info};
use petstats_core::{PetStatistics, StatisticsService, StatsError};
use utoipa::OpenApi;

use crate::openapi::ApiDoc;

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Statistics service wired to the clinic stores.
    pub statistics: StatisticsService,
}

/// Register every PetStats endpoint.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pet_statistics).service(openapi_json);
}

#[utoipa::path(
    get,
    path = "/api/stats/pets",
    responses(
        (status = 200, description = "Pet statistics", body = PetStatistics),
        (status = 500, description = "Statistics could not be computed")
    ),
    tag = "stats"
)]
#[get("/api/stats/pets")]
/// Compute aggregated statistics about the clinic's pets.
pub async fn pet_statistics(state: web::Data<AppState>) -> impl Responder {
    info!("GET /api/stats/pets - Retrieving pet statistics");
    let statistics = state.statistics.clone();
    let result: Result<PetStatistics, StatsError> = web::block(move || statistics.calculate())
        .await
        .map_err(|err| StatsError::Computation(err.to_string()))
        .and_then(|outcome| outcome);

    match result {
        Ok(stats) => {
            info!(
                "Retrieved pet statistics: totalPets={}",
                stats.total_pets
            );
            HttpResponse::Ok().json(stats)
        }
        Err(err) => {
            error!("Error retrieving pet statistics: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document")
    ),
    tag = "system"
)]
#[get("/api/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
