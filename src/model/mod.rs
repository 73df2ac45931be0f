pub mod analysis;
pub mod config;
pub mod incident;

pub use analysis::{AnalysisResult, ExtractedKeyword, KeywordTier, RiskScore};
pub use config::{AnalysisConfig, Config};
pub use incident::{CauseCategory, Incident};
