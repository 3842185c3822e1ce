pub mod reference;
pub mod trend;

use crate::input::InputError;
use crate::model::AnalysisError;
use crate::report::ReportError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
