use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A region update targeted a user id with no directory record.
    ///
    /// Callers upsert on first contact, so hitting this means the store and
    /// the event stream disagree; it is surfaced, never papered over.
    #[error("no directory record for user {user_id}")]
    RecordMissing { user_id: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
