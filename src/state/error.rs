use std::path::PathBuf;

use thiserror::Error;

use super::model::Notice;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("image not found: {}", .path.display())]
    ImageUnavailable { path: PathBuf },
    #[error("prediction {generation} is still in flight")]
    PredictionInFlight { generation: u64 },
}

impl StateError {
    /// The transient message shown to the user for a rejected event.
    pub fn notice(&self) -> Notice {
        match self {
            Self::ImageUnavailable { path } => Notice::ImageUnavailable(path.clone()),
            Self::PredictionInFlight { .. } => Notice::AnalysisInProgress,
        }
    }
}
