use super::error::ErrorEnvelope;
use super::handlers;
use crate::app::dto::{CreateRepRequest, RepResponse, ZoneResponse};
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const DOCS_PATH: &str = "/docs";
pub const OPENAPI_JSON_PATH: &str = "/docs.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Velocity Zones API",
        description = "Record bar-speed reps and classify them into velocity training zones"
    ),
    paths(
        handlers::create_rep,
        handlers::list_reps,
        handlers::get_rep,
        handlers::list_zones,
        handlers::get_zone,
        handlers::health,
    ),
    components(schemas(CreateRepRequest, RepResponse, ZoneResponse, ErrorEnvelope)),
    tags(
        (name = "reps", description = "Recorded repetitions"),
        (name = "zones", description = "Velocity zones and their rep counts"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// Swagger UI 在 `/docs`，OpenAPI JSON 在 `/docs.json`
pub fn routes<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
