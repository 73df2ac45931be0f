//! REST API endpoint for flare-up risk analysis

use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::model::Config;
use crate::service::AnalysisService;

/// Analysis request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// The draft post to analyze
    pub text: String,
}

/// Analyze the flare-up risk of a draft post
#[utoipa::path(
    post,
    path = "/v1/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis completed", body = crate::model::AnalysisResult),
        (status = 400, description = "Empty or oversized input text"),
        (status = 502, description = "Oracle unreachable or timed out")
    ),
    tag = "analysis"
)]
#[post("/v1/analyze")]
pub async fn analyze(
    service: web::Data<AnalysisService>,
    config: web::Data<Config>,
    request: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let text = request.text.as_str();

    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".to_string()));
    }

    let max_chars = config.analysis.max_input_chars;
    if text.chars().count() > max_chars {
        return Err(ApiError::BadRequest(format!(
            "text exceeds the maximum length of {} characters",
            max_chars
        )));
    }

    let result = service.analyze(text).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze);
}
