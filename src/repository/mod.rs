mod embedded;
#[cfg(test)]
pub mod memory;
mod postgres;

pub use postgres::PgNoteRepository;

use async_trait::async_trait;

use crate::models::Note;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),

    #[error("database connection is closed")]
    ConnectionClosed,
}

/// Storage operations for notes.
///
/// Every write runs in its own transaction that is committed on success and
/// rolled back before an error is returned. Lookups report absence as
/// `Ok(None)` / `Ok(false)`.
#[async_trait]
pub trait NoteRepository: Send {
    async fn create_note(&mut self, content: String) -> Result<Note, RepositoryError>;

    /// Returns `None` when no note has the given id.
    async fn update_note(
        &mut self,
        id: i64,
        content: String,
    ) -> Result<Option<Note>, RepositoryError>;

    /// Returns `false` when no note has the given id.
    async fn delete_note(&mut self, id: i64) -> Result<bool, RepositoryError>;

    async fn get_one_note(&mut self, id: i64) -> Result<Option<Note>, RepositoryError>;

    async fn get_all_notes(&mut self) -> Result<Vec<Note>, RepositoryError>;
}
