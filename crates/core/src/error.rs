use crate::repositories::PatientId;

#[derive(Debug, thiserror::Error)]
pub enum OdontoError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid tooth code: {0}")]
    InvalidToothCode(String),
    #[error("invalid odontogram status: {0}")]
    InvalidStatus(String),
    #[error("patient {0} does not exist")]
    PatientNotFound(PatientId),

    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to open database: {0}")]
    DatabaseOpen(rusqlite::Error),
    #[error("failed to bootstrap database schema: {0}")]
    SchemaBootstrap(rusqlite::Error),
    #[error("failed to upgrade database schema: {0}")]
    SchemaUpgrade(rusqlite::Error),
    #[error("database query failed: {0}")]
    Query(rusqlite::Error),

    #[error("failed to serialize odontogram: {0}")]
    Serialization(serde_json::Error),
}

pub type OdontoResult<T> = std::result::Result<T, OdontoError>;
