//! Retrieval of similar historical incidents by keyword overlap

use std::collections::HashSet;

use async_trait::async_trait;

use crate::db::repository::IncidentRepository;
use crate::db::DbError;
use crate::model::Incident;

#[derive(Debug, thiserror::Error)]
pub enum CaseStoreError {
    #[error("Case retrieval failed: {0}")]
    Retrieval(String),
}

impl From<DbError> for CaseStoreError {
    fn from(err: DbError) -> Self {
        CaseStoreError::Retrieval(err.to_string())
    }
}

/// Read-only store of historical incidents, queried by keyword overlap.
///
/// Trait seam so the pipeline can run against an in-memory store in tests.
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Search incidents matching any of the keywords, most relevant first.
    /// Empty keywords yield an empty result, never the whole store.
    async fn search(&self, keywords: &[String]) -> Result<Vec<Incident>, CaseStoreError>;
}

/// PostgreSQL-backed case store
pub struct PgCaseStore {
    repository: IncidentRepository,
    limit: usize,
}

impl PgCaseStore {
    pub fn new(repository: IncidentRepository, limit: usize) -> Self {
        Self { repository, limit }
    }
}

#[async_trait]
impl CaseStore for PgCaseStore {
    async fn search(&self, keywords: &[String]) -> Result<Vec<Incident>, CaseStoreError> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.repository.search_candidates(keywords).await?;
        Ok(rank_incidents(candidates, keywords, self.limit))
    }
}

/// Rank candidate incidents by count of distinct matched keywords
/// (descending), ties broken by ascending incident id, capped to `limit`.
///
/// The ranking is implemented here, not in SQL, so storage-default ordering
/// can never leak into the result.
pub fn rank_incidents(
    candidates: Vec<Incident>,
    keywords: &[String],
    limit: usize,
) -> Vec<Incident> {
    let mut scored: Vec<(usize, Incident)> = candidates
        .into_iter()
        .filter_map(|incident| {
            let text = incident.searchable_text().to_lowercase();
            let matched: HashSet<&str> = keywords
                .iter()
                .map(|k| k.as_str())
                .filter(|k| text.contains(&k.to_lowercase()))
                .collect();

            if matched.is_empty() {
                None
            } else {
                Some((matched.len(), incident))
            }
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.id.cmp(&b.1.id)));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, incident)| incident)
        .collect()
}
