#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("transaction failed: {0}")]
    TransactionFailed(String),
    #[error("corrupt record: {0}")]
    CorruptRecord(String),
}
