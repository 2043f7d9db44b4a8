use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Invalid target month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Statistics calculation failed: {0}")]
    Stats(#[from] analytics::StatsError),
}
