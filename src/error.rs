#[derive(Debug, thiserror::Error)]
pub enum CollectionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Printing '{printing_id}' not found for card {oracle_id}")]
    PrintingNotFound {
        oracle_id: String,
        printing_id: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Name already taken: {0}")]
    NameTaken(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CollectionsError>;
