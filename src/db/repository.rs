//! Repository for incident database operations

use sqlx::PgPool;

use super::models::{IncidentRow, ListIncidentsQuery, PaginatedIncidents};
use super::DbError;
use crate::model::Incident;

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Repository for read-only incident queries
#[derive(Clone)]
pub struct IncidentRepository {
    pool: PgPool,
}

impl IncidentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch incidents whose searchable text matches any of the keywords.
    ///
    /// Returns candidates ordered by id; relevance ranking happens in the
    /// case store, not in SQL. Empty keywords yield no query and no rows.
    pub async fn search_candidates(&self, keywords: &[String]) -> Result<Vec<Incident>, DbError> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        for keyword in keywords {
            params.push(format!("%{}%", keyword));
            let n = params.len();
            conditions.push(format!(
                "(title ILIKE ${n} OR incident_text ILIKE ${n} OR reasoning_text ILIKE ${n} OR cause_category ILIKE ${n})"
            ));
        }

        let select_query = format!(
            "SELECT * FROM incidents WHERE {} ORDER BY id ASC",
            conditions.join(" OR ")
        );

        let rows: Vec<IncidentRow> = {
            let mut q = sqlx::query_as(&select_query);
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_all(&self.pool).await?
        };

        let incidents: Vec<Incident> = rows
            .into_iter()
            .filter_map(|row| row.into_domain().ok())
            .collect();

        tracing::debug!(
            keywords = keywords.len(),
            candidates = incidents.len(),
            "Fetched incident candidates"
        );

        Ok(incidents)
    }

    /// Get an incident by id
    pub async fn get_by_id(&self, id: i64) -> Result<Incident, DbError> {
        let row: IncidentRow = sqlx::query_as("SELECT * FROM incidents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        row.into_domain().map_err(DbError::Serialization)
    }

    /// Count all stored incidents
    pub async fn count(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM incidents")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// List incidents with pagination and filters
    pub async fn list(&self, query: ListIncidentsQuery) -> Result<PaginatedIncidents, DbError> {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).min(100);
        let offset = (page - 1) * page_size;

        // Build dynamic query
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref category) = query.cause_category {
            params.push(category.clone());
            conditions.push(format!("cause_category = ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) as count FROM incidents {}", where_clause);

        let total_count: i64 = {
            let mut q = sqlx::query_scalar(&count_query);
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_one(&self.pool).await?
        };

        let select_query = format!(
            r#"
            SELECT * FROM incidents
            {}
            ORDER BY incident_date DESC, id ASC
            LIMIT {} OFFSET {}
            "#,
            where_clause, page_size, offset
        );

        let rows: Vec<IncidentRow> = {
            let mut q = sqlx::query_as(&select_query);
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_all(&self.pool).await?
        };

        let incidents: Vec<Incident> = rows
            .into_iter()
            .filter_map(|row| row.into_domain().ok())
            .collect();

        let total_pages = ((total_count as f64) / (page_size as f64)).ceil() as u32;

        Ok(PaginatedIncidents {
            incidents,
            page,
            page_size,
            total_count,
            total_pages,
        })
    }
}
