use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("account {0} not found")]
    AccountNotFound(String),
    #[error("account number {0} is already taken")]
    DuplicateAccountNumber(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("failed to acquire database connection lock")]
    FailedToAcquireConnectionLock,
    /// One leg of a two-account write was stored, the other was not.
    #[error("balance of {persisted} was saved but {failed} was not: {source}")]
    PartialWrite {
        persisted: String,
        failed: String,
        #[source]
        source: Box<PersistenceError>,
    },
}
