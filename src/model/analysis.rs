//! Per-request analysis artifacts: keywords, scores, and the assembled result

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::incident::{CauseCategory, Incident};

/// Priority tier of an extracted keyword. Lower tiers sort first in the
/// bounded keyword list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordTier {
    /// Matched one of the high-risk pattern sets
    HighRisk,
    /// Emotional expression (intensifiers, sentiment-laden terms)
    Emotional,
    /// Explicit negative framing
    Negation,
    /// Generic noun fallback
    Noun,
}

/// A salient term extracted from the input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedKeyword {
    pub term: String,
    pub tier: KeywordTier,
}

impl ExtractedKeyword {
    pub fn new(term: impl Into<String>, tier: KeywordTier) -> Self {
        Self {
            term: term.into(),
            tier,
        }
    }
}

/// Multi-factor risk score for one analyzed text.
///
/// All integer sub-scores lie in [0,100]; confidence lies in [0.0,1.0].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RiskScore {
    pub overall_score: u8,
    pub content_risk: u8,
    pub legal_risk: u8,
    pub brand_risk: u8,
    pub social_risk: u8,
    pub category: CauseCategory,
    /// 0.8 when scores were parsed from the oracle response, 0.5 when the
    /// keyword fallback produced them
    pub confidence: f32,
}

/// Result of one analysis request
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalysisResult {
    /// Verbatim echo of the analyzed text
    pub input_text: String,
    pub risk_score: RiskScore,
    /// Oracle's free-form explanatory text
    pub analysis_text: String,
    /// Similar historical incidents, most relevant first
    pub related_cases: Vec<Incident>,
    /// Advisory notes derived from how related cases were handled
    pub recommendations: Vec<String>,
}
