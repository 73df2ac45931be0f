//! Prompts for flare-up risk analysis

use crate::model::{ExtractedKeyword, Incident};

/// System prompt for the analysis oracle
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are a corporate communications risk analyst.

Your role is to assess how likely a draft post is to provoke public backlash,
grounded in the similar past incidents provided with each request.

You must:
- Base conclusions on the draft text, the extracted keywords, and the past incidents
- Compare the draft against why each past incident escalated
- Consider legal exposure, brand image, and social impact separately
- Be conservative when the draft resembles incidents that escalated badly

Do not:
- Invent incidents or outcomes that were not provided
- Soften the assessment because the draft has good intentions

Your reply must begin with the exact labelled score lines requested in the prompt."#;

/// Build the analysis prompt from the draft text, extracted keywords, and
/// retrieved incidents.
///
/// This is the sole place the oracle's expected response shape is specified;
/// the resolver recovers whatever structure actually comes back.
pub fn build_analysis_prompt(
    text: &str,
    keywords: &[ExtractedKeyword],
    cases: &[Incident],
) -> String {
    let keyword_list = if keywords.is_empty() {
        "No salient keywords were extracted.".to_string()
    } else {
        keywords
            .iter()
            .map(|k| k.term.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let cases_text = if cases.is_empty() {
        "No similar past incidents were found.".to_string()
    } else {
        cases
            .iter()
            .enumerate()
            .map(|(i, case)| {
                format!(
                    "### Incident {}\nTitle: {}\nCause category: {}\nWhy it flared up: {}\nOutcome: {}\n",
                    i + 1,
                    case.title,
                    case.cause_category.ja_label(),
                    case.reasoning_text,
                    case.outcome.as_deref().unwrap_or("不明"),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"Assess the flare-up (public backlash) risk of the draft post below,
using the extracted keywords and the similar past incidents as reference.

## Draft Post
{text}

## Extracted Keywords
{keyword_list}

## Similar Past Incidents
{cases_text}

## Analysis Guidelines
1. Use the "why it flared up" reasoning of each past incident to identify latent risks in the draft
2. Classify the cause using exactly one of these categories:
   差別的表現, 誹謗中傷, 個人情報漏洩, 労働問題, 社会的責任の欠如, 情報隠蔽,
   不適切な表現, 不謹慎な表現, 社会問題への偏見, 趣味嗜好への差別
3. Weigh legal exposure, brand image, and social impact separately
4. Provide concrete, actionable wording improvements

---

### Required Output

Begin your reply with these labelled lines, integers from 0 to 100:

overall_score: <overall risk>
content_risk: <content risk>
legal_risk: <legal risk>
brand_risk: <brand risk>
social_risk: <social risk>
category: <one category from the list above>

Then continue with:

analysis: <detailed reasoning, including comparison with the past incidents>
recommendations: <concrete improvements and suggested rewording>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CauseCategory, KeywordTier};
    use chrono::NaiveDate;

    fn sample_incident() -> Incident {
        Incident {
            id: 2,
            title: "女性社員への差別的発言".to_string(),
            incident_text: "女性社員は結婚したら辞めるから昇進させない方が良い。".to_string(),
            incident_date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
            cause_category: CauseCategory::Discrimination,
            reasoning_text: "性別による差別的発言が含まれていたため。".to_string(),
            company_info: Some("某IT企業".to_string()),
            media_url: None,
            response_text: None,
            outcome: Some("炎上拡大".to_string()),
        }
    }

    #[test]
    fn test_prompt_embeds_input_verbatim() {
        let text = "この商品は最悪で、店員の対応も差別的だった";
        let prompt = build_analysis_prompt(text, &[], &[]);

        assert!(prompt.contains(text));
    }

    #[test]
    fn test_prompt_embeds_keywords_and_case_summary() {
        let keywords = vec![
            ExtractedKeyword::new("差別", KeywordTier::HighRisk),
            ExtractedKeyword::new("最悪", KeywordTier::HighRisk),
        ];
        let case = sample_incident();
        let prompt = build_analysis_prompt("テスト投稿", &keywords, &[case.clone()]);

        assert!(prompt.contains("差別, 最悪"));
        assert!(prompt.contains(&case.title));
        assert!(prompt.contains(&case.reasoning_text));
        assert!(prompt.contains("炎上拡大"));
    }

    #[test]
    fn test_prompt_requests_parseable_scores() {
        let prompt = build_analysis_prompt("テスト投稿", &[], &[]);

        for label in [
            "overall_score:",
            "content_risk:",
            "legal_risk:",
            "brand_risk:",
            "social_risk:",
            "category:",
        ] {
            assert!(prompt.contains(label), "prompt should request {label}");
        }
    }

    #[test]
    fn test_prompt_without_cases_notes_absence() {
        let prompt = build_analysis_prompt("テスト投稿", &[], &[]);

        assert!(prompt.contains("No similar past incidents were found."));
    }
}
