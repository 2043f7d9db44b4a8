use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Failed to deserialize raw journal records: {0}")]
    Deserialize(#[from] serde_json::Error),
}
