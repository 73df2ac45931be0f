//! Best-effort parsing of oracle responses into structured risk scores
//!
//! The oracle is only asked, never trusted: any response shape degrades to a
//! structurally valid score instead of an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{CauseCategory, RiskScore};

/// Confidence when explicit numeric scores were parsed from the response
const NUMERIC_CONFIDENCE: f32 = 0.8;
/// Confidence when scores came from vocabulary heuristics or defaults
const FALLBACK_CONFIDENCE: f32 = 0.5;

/// Default overall score when nothing in the response is recognized
const DEFAULT_SCORE: u8 = 50;

/// Severity vocabulary for the keyword fallback, scanned high to low
const HIGH_SEVERITY_TERMS: &[&str] = &["高", "危険", "炎上", "問題", "不適切", "差別", "誹謗"];
const MEDIUM_SEVERITY_TERMS: &[&str] = &["中", "注意", "慎重", "配慮"];
const LOW_SEVERITY_TERMS: &[&str] = &["低", "安全", "問題なし", "適切"];

static OVERALL_SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:overall_score|総合スコア|リスクスコア)\s*[:：]\s*(\d+)").expect("valid regex")
});
static CONTENT_RISK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:content_risk|コンテンツリスク)\s*[:：]\s*(\d+)").expect("valid regex")
});
static LEGAL_RISK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:legal_risk|法的リスク)\s*[:：]\s*(\d+)").expect("valid regex")
});
static BRAND_RISK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:brand_risk|ブランドリスク)\s*[:：]\s*(\d+)").expect("valid regex")
});
static SOCIAL_RISK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:social_risk|社会的リスク)\s*[:：]\s*(\d+)").expect("valid regex")
});
static CATEGORY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:category|カテゴリ)\s*[:：]\s*([a-z_]+)").expect("valid regex")
});

/// How the overall score was derived from the response
#[derive(Debug, PartialEq, Eq)]
enum ParseOutcome {
    /// Explicit numeric fields were present
    Numeric {
        overall: u8,
        content: Option<u8>,
        legal: Option<u8>,
        brand: Option<u8>,
        social: Option<u8>,
    },
    /// No numeric overall score, but recognized severity vocabulary
    KeywordFallback(u8),
    /// Nothing recognized
    Default,
}

/// Parse the oracle's free-text response into a risk score.
///
/// Total: any input, including the empty string, yields a score with all
/// fields within bounds.
pub fn resolve(response: &str) -> RiskScore {
    let outcome = classify(response);
    let category = extract_category(response);

    match outcome {
        ParseOutcome::Numeric {
            overall,
            content,
            legal,
            brand,
            social,
        } => RiskScore {
            overall_score: overall,
            content_risk: content.unwrap_or(overall),
            legal_risk: legal.unwrap_or(overall),
            brand_risk: brand.unwrap_or(overall),
            social_risk: social.unwrap_or(overall),
            category,
            confidence: NUMERIC_CONFIDENCE,
        },
        ParseOutcome::KeywordFallback(score) => {
            tracing::debug!(score, "No numeric scores in oracle response, using severity vocabulary");
            uniform_score(score, category)
        }
        ParseOutcome::Default => {
            tracing::debug!("Oracle response not recognized, using default score");
            uniform_score(DEFAULT_SCORE, category)
        }
    }
}

fn uniform_score(score: u8, category: CauseCategory) -> RiskScore {
    RiskScore {
        overall_score: score,
        content_risk: score,
        legal_risk: score,
        brand_risk: score,
        social_risk: score,
        category,
        confidence: FALLBACK_CONFIDENCE,
    }
}

fn classify(response: &str) -> ParseOutcome {
    if let Some(overall) = parse_score(&OVERALL_SCORE_RE, response) {
        return ParseOutcome::Numeric {
            overall,
            content: parse_score(&CONTENT_RISK_RE, response),
            legal: parse_score(&LEGAL_RISK_RE, response),
            brand: parse_score(&BRAND_RISK_RE, response),
            social: parse_score(&SOCIAL_RISK_RE, response),
        };
    }

    if HIGH_SEVERITY_TERMS.iter().any(|t| response.contains(t)) {
        return ParseOutcome::KeywordFallback(80);
    }
    if MEDIUM_SEVERITY_TERMS.iter().any(|t| response.contains(t)) {
        return ParseOutcome::KeywordFallback(50);
    }
    if LOW_SEVERITY_TERMS.iter().any(|t| response.contains(t)) {
        return ParseOutcome::KeywordFallback(20);
    }

    ParseOutcome::Default
}

/// Parse and clamp a labelled score field into [0,100]
fn parse_score(pattern: &Regex, response: &str) -> Option<u8> {
    let capture = pattern.captures(response)?;
    let value: u32 = capture.get(1)?.as_str().parse().ok()?;
    Some(value.min(100) as u8)
}

/// Match the response against the cause-category enumeration.
///
/// A labelled `category:` line with an English name is compared whole, so
/// names that contain other names (taste_discrimination vs discrimination)
/// resolve correctly. Japanese labels are scanned anywhere in the response,
/// first match wins in declaration order.
fn extract_category(response: &str) -> CauseCategory {
    if let Some(capture) = CATEGORY_NAME_RE.captures(response) {
        let name = capture[1].to_lowercase();
        if let Some(category) = CauseCategory::ALL.into_iter().find(|c| c.name() == name) {
            return category;
        }
    }

    CauseCategory::ALL
        .into_iter()
        .find(|c| response.contains(c.ja_label()))
        .unwrap_or(CauseCategory::InappropriateExpression)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_numeric_fields() {
        let score = resolve(
            "overall_score: 85, content_risk: 90, legal_risk: 70, brand_risk: 60, social_risk: 50",
        );

        assert_eq!(score.overall_score, 85);
        assert_eq!(score.content_risk, 90);
        assert_eq!(score.legal_risk, 70);
        assert_eq!(score.brand_risk, 60);
        assert_eq!(score.social_risk, 50);
        assert_eq!(score.confidence, 0.8);
    }

    #[test]
    fn test_overall_only_fills_sub_scores() {
        let score = resolve("overall_score: 75");

        assert_eq!(score.overall_score, 75);
        assert_eq!(score.content_risk, 75);
        assert_eq!(score.legal_risk, 75);
        assert_eq!(score.brand_risk, 75);
        assert_eq!(score.social_risk, 75);
        assert_eq!(score.confidence, 0.8);
    }

    #[test]
    fn test_scores_clamped() {
        let score = resolve("overall_score: 250, legal_risk: 999");

        assert_eq!(score.overall_score, 100);
        assert_eq!(score.legal_risk, 100);
    }

    #[test]
    fn test_japanese_score_label() {
        let score = resolve("リスクスコア: 65\n分析結果: ...");

        assert_eq!(score.overall_score, 65);
        assert_eq!(score.confidence, 0.8);
    }

    #[test]
    fn test_high_severity_fallback() {
        let score = resolve("この投稿は危険とみられます");

        assert_eq!(score.overall_score, 80);
        assert_eq!(score.confidence, 0.5);
    }

    #[test]
    fn test_low_severity_fallback() {
        let score = resolve("安全です");

        assert_eq!(score.overall_score, 20);
        assert_eq!(score.confidence, 0.5);
    }

    #[test]
    fn test_unrecognized_response_defaults() {
        let score = resolve("well, hard to say");

        assert_eq!(score.overall_score, 50);
        assert_eq!(score.content_risk, 50);
        assert_eq!(score.confidence, 0.5);
    }

    #[test]
    fn test_empty_response_defaults() {
        let score = resolve("");

        assert_eq!(score.overall_score, 50);
        assert_eq!(score.confidence, 0.5);
        assert_eq!(score.category, CauseCategory::InappropriateExpression);
    }

    #[test]
    fn test_category_from_japanese_label() {
        let score = resolve("overall_score: 40\ncategory: 労働問題");

        assert_eq!(score.category, CauseCategory::LaborIssue);
    }

    #[test]
    fn test_category_scan_order() {
        // Both labels present; discrimination is scanned first
        let score = resolve("差別的表現と不適切な表現の両方に該当");

        assert_eq!(score.category, CauseCategory::Discrimination);
    }

    #[test]
    fn test_category_from_english_name() {
        let score = resolve("overall_score: 30\ncategory: privacy_leak");

        assert_eq!(score.category, CauseCategory::PrivacyLeak);
    }

    #[test]
    fn test_category_name_compared_whole() {
        // taste_discrimination must not resolve to discrimination
        let score = resolve("overall_score: 30\ncategory: taste_discrimination");

        assert_eq!(score.category, CauseCategory::TasteDiscrimination);
    }

    #[test]
    fn test_unknown_category_name_falls_back() {
        let score = resolve("overall_score: 30\ncategory: other");

        assert_eq!(score.category, CauseCategory::InappropriateExpression);
    }
}
