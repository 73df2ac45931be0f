//! Row types and query parameters for incident persistence

use chrono::NaiveDate;
use sqlx::FromRow;

use crate::model::{CauseCategory, Incident};

/// Raw incident row as stored in PostgreSQL
#[derive(Debug, FromRow)]
pub struct IncidentRow {
    pub id: i64,
    pub title: String,
    pub incident_text: String,
    pub incident_date: NaiveDate,
    pub cause_category: String,
    pub reasoning_text: String,
    pub company_info: Option<String>,
    pub media_url: Option<String>,
    pub response_text: Option<String>,
    pub outcome: Option<String>,
}

impl IncidentRow {
    /// Convert a stored row into the domain model
    pub fn into_domain(self) -> Result<Incident, String> {
        let cause_category = CauseCategory::from_ja_label(&self.cause_category)
            .ok_or_else(|| format!("Unknown cause category: {}", self.cause_category))?;

        Ok(Incident {
            id: self.id,
            title: self.title,
            incident_text: self.incident_text,
            incident_date: self.incident_date,
            cause_category,
            reasoning_text: self.reasoning_text,
            company_info: self.company_info,
            media_url: self.media_url,
            response_text: self.response_text,
            outcome: self.outcome,
        })
    }
}

/// Query parameters for listing incidents
#[derive(Debug, Default)]
pub struct ListIncidentsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub cause_category: Option<String>,
}

/// Paginated incident listing
#[derive(Debug)]
pub struct PaginatedIncidents {
    pub incidents: Vec<Incident>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: u32,
}
