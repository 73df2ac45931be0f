//! OpenAPI specification endpoints

use actix_web::{get, HttpResponse, Responder};
use utoipa::OpenApi;

use crate::api::{analyze, health, incidents};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Flare-up Risk Analysis API",
        description = "Estimates the public-backlash risk of draft posts using historical incidents and a generative model"
    ),
    paths(
        analyze::analyze,
        incidents::list_incidents,
        incidents::get_incident,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        analyze::AnalyzeRequest,
        incidents::IncidentListResponse,
        crate::model::AnalysisResult,
        crate::model::RiskScore,
        crate::model::Incident,
        crate::model::CauseCategory,
    )),
    tags(
        (name = "analysis", description = "Flare-up risk analysis"),
        (name = "incidents", description = "Historical incident store"),
        (name = "health", description = "Service health probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/yaml")
        .body(ApiDoc::openapi().to_yaml().unwrap())
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
