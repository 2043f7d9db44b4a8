use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown session type: {0}")]
    UnknownSessionType(String),

    #[error("Unknown session outcome: {0}")]
    UnknownOutcome(String),

    #[error("Unknown trade direction: {0}")]
    UnknownDirection(String),
}
