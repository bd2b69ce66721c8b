pub mod cli;
pub mod criteria;
pub mod criteria_set;
pub mod error;
pub mod evaluator;
pub mod metadata;
pub mod types;

pub use cli::report::TextReport;
pub use criteria::Criterion;
pub use criteria_set::{BuiltinCriteria, CriteriaSet};
pub use error::{ConformanceError, Result};
pub use evaluator::CriteriaEvaluator;
pub use metadata::InstanceMetadata;
pub use types::*;
