//! Historical flare-up incidents and their cause taxonomy

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed taxonomy of why an incident escalated.
///
/// The declaration order is significant: `ScoreResolver` matches a model
/// response against the variants in this order, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CauseCategory {
    Discrimination,
    Defamation,
    PrivacyLeak,
    LaborIssue,
    SocialResponsibility,
    InformationConcealment,
    InappropriateExpression,
    TactlessExpression,
    SocialBias,
    TasteDiscrimination,
}

impl CauseCategory {
    /// All categories in scan order
    pub const ALL: [CauseCategory; 10] = [
        CauseCategory::Discrimination,
        CauseCategory::Defamation,
        CauseCategory::PrivacyLeak,
        CauseCategory::LaborIssue,
        CauseCategory::SocialResponsibility,
        CauseCategory::InformationConcealment,
        CauseCategory::InappropriateExpression,
        CauseCategory::TactlessExpression,
        CauseCategory::SocialBias,
        CauseCategory::TasteDiscrimination,
    ];

    /// Japanese label as stored with the incidents and produced by the oracle
    pub fn ja_label(&self) -> &'static str {
        match self {
            CauseCategory::Discrimination => "差別的表現",
            CauseCategory::Defamation => "誹謗中傷",
            CauseCategory::PrivacyLeak => "個人情報漏洩",
            CauseCategory::LaborIssue => "労働問題",
            CauseCategory::SocialResponsibility => "社会的責任の欠如",
            CauseCategory::InformationConcealment => "情報隠蔽",
            CauseCategory::InappropriateExpression => "不適切な表現",
            CauseCategory::TactlessExpression => "不謹慎な表現",
            CauseCategory::SocialBias => "社会問題への偏見",
            CauseCategory::TasteDiscrimination => "趣味嗜好への差別",
        }
    }

    /// English identifier matching the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            CauseCategory::Discrimination => "discrimination",
            CauseCategory::Defamation => "defamation",
            CauseCategory::PrivacyLeak => "privacy_leak",
            CauseCategory::LaborIssue => "labor_issue",
            CauseCategory::SocialResponsibility => "social_responsibility",
            CauseCategory::InformationConcealment => "information_concealment",
            CauseCategory::InappropriateExpression => "inappropriate_expression",
            CauseCategory::TactlessExpression => "tactless_expression",
            CauseCategory::SocialBias => "social_bias",
            CauseCategory::TasteDiscrimination => "taste_discrimination",
        }
    }

    /// Parse the Japanese label used in storage
    pub fn from_ja_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.ja_label() == label)
    }
}

/// A historical public-backlash case. Seeded out of band, read-only to the
/// analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Incident {
    /// Stable unique identifier
    pub id: i64,
    pub title: String,
    /// The post that flared up
    pub incident_text: String,
    pub incident_date: NaiveDate,
    pub cause_category: CauseCategory,
    /// Why the post escalated
    pub reasoning_text: String,
    pub company_info: Option<String>,
    pub media_url: Option<String>,
    /// How the organization responded
    pub response_text: Option<String>,
    /// How the incident played out
    pub outcome: Option<String>,
}

impl Incident {
    /// Combined text the case store matches keywords against
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title,
            self.incident_text,
            self.reasoning_text,
            self.cause_category.ja_label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ja_label_round_trip() {
        for category in CauseCategory::ALL {
            assert_eq!(
                CauseCategory::from_ja_label(category.ja_label()),
                Some(category)
            );
        }
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(CauseCategory::from_ja_label("その他"), None);
    }
}
