pub mod analysis;
pub mod case_store;
pub mod keywords;
pub mod oracle;
pub mod prompt;
pub mod resolver;

pub use analysis::{AnalysisError, AnalysisService};
pub use case_store::PgCaseStore;
pub use oracle::OpenAiOracle;
