//! Keyword extraction from draft posts
//!
//! Derives a ranked, bounded list of salient terms using layered pattern
//! rules: high-risk phrase sets first, then emotional expressions, negation
//! expressions, and finally generic noun runs as a fallback.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ExtractedKeyword, KeywordTier};

/// Upper bound on the extracted keyword list
pub const MAX_KEYWORDS: usize = 15;

/// High-risk phrase catalogue, keyed by risk category.
///
/// Catalogue order is the tie-break order for matches within the high-risk
/// stage; the catch-all inappropriate-expression set comes last. The phrase
/// lists are the authoritative rule set: extend a category here, not in the
/// extraction logic.
const RISK_PATTERN_CATALOGUE: &[(&str, &str)] = &[
    (
        "discrimination",
        "女性|男性|性別|結婚|妊娠|老人|高齢者|障害者|外国人|移民|LGBT|差別|偏見|見下す|男|女",
    ),
    ("defamation", "パクリ|盗作|コピー|真似|卑劣"),
    ("privacy_leak", "住所|電話|個人情報|名前|メール"),
    ("labor_issue", "残業|給料|労働|働く|従業員"),
    ("social_responsibility", "環境|地球|温暖化|CO2|エコ"),
    ("social_issue", "税金|政治|政府|国|社会"),
    ("taste_discrimination", "アニメ|ゲーム|趣味|文化|遅れ"),
    ("competitive_conflict", "競合|他社|ライバル|対抗"),
    ("information_concealment", "完璧|問題ない|デマ|嘘|隠蔽"),
    (
        "inappropriate_expression",
        "クソ|くそ|最悪|ひどい|ダメ|だめ|やばい|うざい|うっとうしい|殺害|殺す|死ね|暴力|暴行",
    ),
];

static RISK_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    RISK_PATTERN_CATALOGUE
        .iter()
        .map(|(category, phrases)| (*category, Regex::new(phrases).expect("valid risk pattern")))
        .collect()
});

static EMOTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("怒|悲|喜|驚|恐|嫌|愛|恨|妬|嫉|すごい|やばい|ひどい|最悪|最高|素晴らしい|絶対に|絶対")
        .expect("valid emotion pattern")
});

static NEGATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("買わないで|買わない|買うな|やめて|やめろ|禁止する|禁止|ない|無い|だめ|ダメ")
        .expect("valid negation pattern")
});

static NOUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[ぁ-んァ-ヶ一-龯]{2,}").expect("valid noun pattern"));

/// Extract salient keywords from the input text.
///
/// Deterministic and total: empty or whitespace-only input yields an empty
/// list. A term captured by an earlier stage is never re-added by a later
/// one. The result is capped at [`MAX_KEYWORDS`] entries with stage priority
/// preserved.
pub fn extract(text: &str) -> Vec<ExtractedKeyword> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut keywords = Vec::new();

    for (_, pattern) in RISK_PATTERNS.iter() {
        collect_matches(pattern, text, KeywordTier::HighRisk, &mut seen, &mut keywords);
    }

    collect_matches(&EMOTION_PATTERN, text, KeywordTier::Emotional, &mut seen, &mut keywords);
    collect_matches(&NEGATION_PATTERN, text, KeywordTier::Negation, &mut seen, &mut keywords);
    collect_matches(&NOUN_PATTERN, text, KeywordTier::Noun, &mut seen, &mut keywords);

    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Append unseen matches of `pattern` in first-occurrence order
fn collect_matches<'t>(
    pattern: &Regex,
    text: &'t str,
    tier: KeywordTier,
    seen: &mut HashSet<&'t str>,
    keywords: &mut Vec<ExtractedKeyword>,
) {
    for found in pattern.find_iter(text) {
        if seen.insert(found.as_str()) {
            keywords.push(ExtractedKeyword::new(found.as_str(), tier));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms_of(tier: KeywordTier, keywords: &[ExtractedKeyword]) -> Vec<&str> {
        keywords
            .iter()
            .filter(|k| k.tier == tier)
            .map(|k| k.term.as_str())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_whitespace_input() {
        assert!(extract("   \n\t  ").is_empty());
    }

    #[test]
    fn test_discrimination_precedes_sentiment() {
        let keywords = extract("この商品は最悪で、店員の対応も差別的だった");

        let discrimination = keywords
            .iter()
            .position(|k| k.term == "差別")
            .expect("差別 extracted");
        let sentiment = keywords
            .iter()
            .position(|k| k.term == "最悪")
            .expect("最悪 extracted");

        assert!(discrimination < sentiment);
        assert_eq!(keywords[discrimination].tier, KeywordTier::HighRisk);
    }

    #[test]
    fn test_high_risk_precedes_emotional() {
        let keywords = extract("残業が多すぎてすごい大変です");

        let labor = keywords.iter().position(|k| k.term == "残業").unwrap();
        let emotion = keywords.iter().position(|k| k.term == "すごい").unwrap();

        assert!(labor < emotion);
        assert_eq!(keywords[labor].tier, KeywordTier::HighRisk);
        assert_eq!(keywords[emotion].tier, KeywordTier::Emotional);
    }

    #[test]
    fn test_negation_extracted_after_emotional() {
        let keywords = extract("絶対に買わないでください");

        let emotional = terms_of(KeywordTier::Emotional, &keywords);
        let negation = terms_of(KeywordTier::Negation, &keywords);

        assert!(emotional.contains(&"絶対に"));
        assert!(negation.contains(&"買わないで"));

        let last_emotional = keywords
            .iter()
            .rposition(|k| k.tier == KeywordTier::Emotional)
            .unwrap();
        let first_negation = keywords
            .iter()
            .position(|k| k.tier == KeywordTier::Negation)
            .unwrap();
        assert!(last_emotional < first_negation);
    }

    #[test]
    fn test_term_captured_once() {
        // ダメ is both an inappropriate-expression phrase and a negation phrase
        let keywords = extract("ダメな対応でした");

        let occurrences: Vec<_> = keywords.iter().filter(|k| k.term == "ダメ").collect();
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].tier, KeywordTier::HighRisk);
    }

    #[test]
    fn test_noun_fallback_for_plain_text() {
        let keywords = extract("春の新作発表会");

        assert!(!keywords.is_empty());
        assert!(keywords.iter().all(|k| k.tier == KeywordTier::Noun));
    }

    #[test]
    fn test_capped_at_fifteen() {
        // 20 distinct noun runs separated by ascii spaces
        let text = "山川 海空 花鳥 風月 雪雲 星夜 朝日 夕日 森林 草原 \
                    岩石 砂浜 波音 火山 湖畔 渓谷 平野 丘陵 盆地 半島";
        let keywords = extract(text);

        assert_eq!(keywords.len(), MAX_KEYWORDS);
    }

    #[test]
    fn test_within_stage_first_occurrence_order() {
        let keywords = extract("嘘と隠蔽だらけの会社");

        let concealment: Vec<&str> = keywords
            .iter()
            .filter(|k| k.tier == KeywordTier::HighRisk)
            .map(|k| k.term.as_str())
            .collect();
        assert_eq!(concealment, vec!["嘘", "隠蔽"]);
    }
}
