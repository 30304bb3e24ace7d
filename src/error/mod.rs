use crate::i18n::CatalogError;
use crate::predict::PredictionError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("message catalog is incomplete: {0}")]
    Catalog(#[from] CatalogError),
    #[error("failed to initialize prediction client: {0}")]
    Prediction(#[from] PredictionError),
}
