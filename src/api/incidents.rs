//! REST API endpoints for browsing the incident store

use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiError;
use crate::db::models::ListIncidentsQuery;
use crate::db::repository::IncidentRepository;
use crate::model::Incident;

/// Query parameters for listing incidents
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListIncidentsParams {
    /// Page number (1-indexed, default: 1)
    pub page: Option<u32>,
    /// Page size (default: 20, max: 100)
    pub page_size: Option<u32>,
    /// Filter by cause category (Japanese label, e.g. 差別的表現)
    pub cause_category: Option<String>,
}

/// Paginated response for incidents
#[derive(Debug, Serialize, ToSchema)]
pub struct IncidentListResponse {
    pub incidents: Vec<Incident>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: u32,
}

/// List historical incidents with pagination and filters
#[utoipa::path(
    get,
    path = "/v1/incidents",
    params(ListIncidentsParams),
    responses(
        (status = 200, description = "Incidents retrieved successfully", body = IncidentListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "incidents"
)]
#[get("/v1/incidents")]
pub async fn list_incidents(
    repository: web::Data<IncidentRepository>,
    query: web::Query<ListIncidentsParams>,
) -> Result<HttpResponse, ApiError> {
    let db_query = ListIncidentsQuery {
        page: query.page,
        page_size: query.page_size,
        cause_category: query.cause_category.clone(),
    };

    let paginated = repository.list(db_query).await?;

    Ok(HttpResponse::Ok().json(IncidentListResponse {
        incidents: paginated.incidents,
        page: paginated.page,
        page_size: paginated.page_size,
        total_count: paginated.total_count,
        total_pages: paginated.total_pages,
    }))
}

/// Get a historical incident by id
#[utoipa::path(
    get,
    path = "/v1/incidents/{id}",
    params(
        ("id" = i64, Path, description = "Incident id")
    ),
    responses(
        (status = 200, description = "Incident retrieved successfully", body = Incident),
        (status = 404, description = "Incident not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "incidents"
)]
#[get("/v1/incidents/{id}")]
pub async fn get_incident(
    repository: web::Data<IncidentRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let incident = repository.get_by_id(id).await?;

    Ok(HttpResponse::Ok().json(incident))
}

/// Configure incident routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_incidents).service(get_incident);
}
