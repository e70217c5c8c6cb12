use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypesError {
    #[error("invalid request document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}
