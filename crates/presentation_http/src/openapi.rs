//! OpenAPI documentation module
//!
//! Serves the OpenAPI 3 document of the climate API as JSON.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use crate::{handlers, state::AppState};

/// Path of the generated document
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation for the climate API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hawaii Climate API",
        description = "Read-only queries over Hawaii weather station observations",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "climate", description = "Precipitation, station and temperature queries"),
        (name = "health", description = "Health check and readiness endpoints")
    ),
    paths(
        handlers::home::home,
        handlers::climate::precipitation,
        handlers::climate::stations,
        handlers::climate::tobs,
        handlers::climate::temperature_stats_from,
        handlers::climate::temperature_stats_between,
        handlers::health::health_check,
        handlers::health::readiness_check,
    ),
    components(
        schemas(
            handlers::climate::TemperatureObservationResponse,
            handlers::climate::StartStatsResponse,
            handlers::climate::RangeStatsResponse,
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::DatabaseStatus,
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Create the route serving the OpenAPI document
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/health",
            "/ready",
            "/api/v1.0/precipitation",
            "/api/v1.0/stations",
            "/api/v1.0/tobs",
            "/api/v1.0/{start}",
            "/api/v1.0/{start}/{end}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn openapi_has_tags() {
        let doc = ApiDoc::openapi();
        let tags: Vec<&str> = doc
            .tags
            .as_ref()
            .map(|t| t.iter().map(|tag| tag.name.as_str()).collect())
            .unwrap_or_default();

        assert_eq!(tags, vec!["climate", "health"]);
    }

    #[test]
    fn openapi_version_follows_crate() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(doc.info.title, "Hawaii Climate API");
    }

    #[test]
    fn openapi_registers_response_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.unwrap().schemas;
        assert!(schemas.contains_key("RangeStatsResponse"));
        assert!(schemas.contains_key("ErrorResponse"));
    }
}
