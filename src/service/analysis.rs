//! Flare-up risk analysis pipeline
//!
//! Orchestrates keyword extraction, case retrieval, prompt construction, the
//! oracle call, and score resolution into one request/response cycle.

use std::sync::Arc;
use std::time::Duration;

use crate::model::{AnalysisConfig, AnalysisResult, Incident};
use crate::service::case_store::CaseStore;
use crate::service::oracle::{CompletionOracle, OracleError};
use crate::service::prompt::build_analysis_prompt;
use crate::service::{keywords, resolver};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Input text is empty")]
    EmptyInput,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// One-shot risk analysis service.
///
/// Holds no per-request state; safe to share across concurrent requests.
pub struct AnalysisService {
    case_store: Arc<dyn CaseStore>,
    oracle: Arc<dyn CompletionOracle>,
    config: AnalysisConfig,
}

impl AnalysisService {
    pub fn new(
        case_store: Arc<dyn CaseStore>,
        oracle: Arc<dyn CompletionOracle>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            case_store,
            oracle,
            config,
        }
    }

    /// Analyze one draft post.
    ///
    /// Case retrieval failures degrade to an analysis without case examples;
    /// an oracle failure or timeout is fatal to the request since there is
    /// no response to score.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let start_time = std::time::Instant::now();

        let extracted = keywords::extract(text);
        tracing::debug!(keywords = extracted.len(), "Extracted keywords");

        let terms: Vec<String> = extracted.iter().map(|k| k.term.clone()).collect();
        let related_cases = match self.case_store.search(&terms).await {
            Ok(cases) => cases,
            Err(e) => {
                tracing::warn!(error = %e, "Case retrieval failed, continuing without case examples");
                Vec::new()
            }
        };

        let prompt = build_analysis_prompt(text, &extracted, &related_cases);

        let budget = Duration::from_secs(self.config.oracle_timeout_secs);
        let analysis_text = match tokio::time::timeout(budget, self.oracle.complete(&prompt)).await
        {
            Ok(result) => result?,
            Err(_) => {
                tracing::error!(
                    timeout_secs = self.config.oracle_timeout_secs,
                    "Oracle call exceeded time budget"
                );
                return Err(OracleError::Timeout(self.config.oracle_timeout_secs).into());
            }
        };

        let risk_score = resolver::resolve(&analysis_text);
        let recommendations = derive_recommendations(&related_cases);

        tracing::info!(
            overall_score = risk_score.overall_score,
            confidence = risk_score.confidence,
            related_cases = related_cases.len(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "Analysis completed"
        );

        Ok(AnalysisResult {
            input_text: text.to_string(),
            risk_score,
            analysis_text,
            related_cases,
            recommendations,
        })
    }
}

/// Derive advisory notes from how the related cases were handled.
///
/// Independent of the resolver: the advice comes from the organizational
/// responses on record, not from the oracle's scoring.
fn derive_recommendations(cases: &[Incident]) -> Vec<String> {
    cases
        .iter()
        .filter_map(|case| {
            let response = case.response_text.as_deref()?.trim();
            if response.is_empty() {
                return None;
            }

            Some(match case.outcome.as_deref().filter(|o| !o.trim().is_empty()) {
                Some(outcome) => format!(
                    "類似事例「{}」（結果: {}）の対応を参考に: {}",
                    case.title, outcome, response
                ),
                None => format!("類似事例「{}」の対応を参考に: {}", case.title, response),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CauseCategory;
    use crate::service::case_store::{rank_incidents, CaseStoreError};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct StubOracle {
        response: &'static str,
        last_prompt: Mutex<Option<String>>,
    }

    impl StubOracle {
        fn new(response: &'static str) -> Self {
            Self {
                response,
                last_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionOracle for StubOracle {
        async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            Ok(self.response.to_string())
        }
    }

    struct FailingOracle;

    #[async_trait]
    impl CompletionOracle for FailingOracle {
        async fn complete(&self, _prompt: &str) -> Result<String, OracleError> {
            Err(OracleError::Completion("connection refused".to_string()))
        }
    }

    struct MemoryCaseStore {
        incidents: Vec<Incident>,
    }

    #[async_trait]
    impl CaseStore for MemoryCaseStore {
        async fn search(&self, keywords: &[String]) -> Result<Vec<Incident>, CaseStoreError> {
            if keywords.is_empty() {
                return Ok(Vec::new());
            }
            Ok(rank_incidents(self.incidents.clone(), keywords, 3))
        }
    }

    struct UnavailableCaseStore;

    #[async_trait]
    impl CaseStore for UnavailableCaseStore {
        async fn search(&self, _keywords: &[String]) -> Result<Vec<Incident>, CaseStoreError> {
            Err(CaseStoreError::Retrieval("storage unavailable".to_string()))
        }
    }

    fn incident(
        id: i64,
        title: &str,
        text: &str,
        reasoning: &str,
        category: CauseCategory,
    ) -> Incident {
        Incident {
            id,
            title: title.to_string(),
            incident_text: text.to_string(),
            incident_date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
            cause_category: category,
            reasoning_text: reasoning.to_string(),
            company_info: None,
            media_url: None,
            response_text: Some("再発防止に努めます。".to_string()),
            outcome: Some("炎上拡大".to_string()),
        }
    }

    fn service(store: Arc<dyn CaseStore>, oracle: Arc<dyn CompletionOracle>) -> AnalysisService {
        AnalysisService::new(store, oracle, AnalysisConfig::default())
    }

    #[tokio::test]
    async fn test_end_to_end_with_stubbed_oracle() {
        let store = Arc::new(MemoryCaseStore {
            incidents: vec![
                incident(
                    1,
                    "労働問題の事例",
                    "残業の話",
                    "長時間労働が批判されたため。",
                    CauseCategory::LaborIssue,
                ),
                incident(
                    2,
                    "女性社員への差別的発言",
                    "性別による差別の話",
                    "性別による差別的発言が含まれていたため。",
                    CauseCategory::Discrimination,
                ),
            ],
        });
        let oracle = Arc::new(StubOracle::new("overall_score: 75"));
        let svc = service(store, oracle.clone());

        let input = "この商品は最悪で、店員の対応も差別的だった";
        let result = svc.analyze(input).await.unwrap();

        assert_eq!(result.input_text, input);
        assert_eq!(result.risk_score.overall_score, 75);
        assert_eq!(result.risk_score.confidence, 0.8);

        // The discrimination incident ranks first
        assert_eq!(
            result.related_cases[0].cause_category,
            CauseCategory::Discrimination
        );

        // The prompt carried the input verbatim and the retrieved case title
        let prompt = oracle.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains(input));
        assert!(prompt.contains("女性社員への差別的発言"));
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_empty_cases() {
        let svc = service(
            Arc::new(UnavailableCaseStore),
            Arc::new(StubOracle::new("overall_score: 40")),
        );

        let result = svc.analyze("残業が多すぎる").await.unwrap();

        assert!(result.related_cases.is_empty());
        assert!(result.recommendations.is_empty());
        assert_eq!(result.risk_score.overall_score, 40);
    }

    #[tokio::test]
    async fn test_oracle_failure_is_fatal() {
        let svc = service(
            Arc::new(MemoryCaseStore { incidents: vec![] }),
            Arc::new(FailingOracle),
        );

        let err = svc.analyze("残業が多すぎる").await.unwrap_err();

        assert!(matches!(err, AnalysisError::Oracle(_)));
    }

    #[tokio::test]
    async fn test_empty_input_rejected() {
        let svc = service(
            Arc::new(MemoryCaseStore { incidents: vec![] }),
            Arc::new(StubOracle::new("overall_score: 10")),
        );

        assert!(matches!(
            svc.analyze("   ").await.unwrap_err(),
            AnalysisError::EmptyInput
        ));
    }

    #[tokio::test]
    async fn test_recommendations_from_case_responses() {
        let store = Arc::new(MemoryCaseStore {
            incidents: vec![incident(
                2,
                "女性社員への差別的発言",
                "性別による差別の話",
                "性別による差別的発言が含まれていたため。",
                CauseCategory::Discrimination,
            )],
        });
        let svc = service(store, Arc::new(StubOracle::new("overall_score: 60")));

        let result = svc.analyze("差別的な発言").await.unwrap();

        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].contains("再発防止に努めます。"));
        assert!(result.recommendations[0].contains("炎上拡大"));
    }

    #[tokio::test]
    async fn test_garbage_oracle_response_degrades() {
        let svc = service(
            Arc::new(MemoryCaseStore { incidents: vec![] }),
            Arc::new(StubOracle::new("???")),
        );

        let result = svc.analyze("残業が多すぎる").await.unwrap();

        assert_eq!(result.risk_score.overall_score, 50);
        assert_eq!(result.risk_score.confidence, 0.5);
    }
}
