//! OpenAPI specification for the PetStats server.

use utoipa::OpenApi;

use petstats_core::PetStatistics;

#[derive(OpenApi)]
#[openapi(
    paths(crate::routes::pet_statistics, crate::routes::openapi_json),
    components(schemas(PetStatistics)),
    tags(
        (name = "stats", description = "Clinic statistics"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the PetStats server.
pub struct ApiDoc;
