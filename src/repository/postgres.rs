use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Transaction};

use super::{NoteRepository, RepositoryError, embedded::migrations};
use crate::models::Note;

const INSERT_NOTE: &str =
    "INSERT INTO notes (content) VALUES ($1) RETURNING id, content, created_at, updated_at";
const UPDATE_NOTE: &str = "UPDATE notes SET content = $1, updated_at = NOW() WHERE id = $2 \
     RETURNING id, content, created_at, updated_at";
const DELETE_NOTE: &str = "DELETE FROM notes WHERE id = $1";
const SELECT_NOTE: &str = "SELECT id, content, created_at, updated_at FROM notes WHERE id = $1";
const SELECT_NOTES: &str = "SELECT id, content, created_at, updated_at FROM notes ORDER BY id";

/// Note storage backed by a single PostgreSQL connection.
pub struct PgNoteRepository {
    client: Client,
}

impl PgNoteRepository {
    pub async fn connect(database_dsn: &str) -> Result<Self, RepositoryError> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), RepositoryError> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    fn ensure_open(&self) -> Result<(), RepositoryError> {
        if self.client.is_closed() {
            return Err(RepositoryError::ConnectionClosed);
        }
        Ok(())
    }
}

async fn rollback(tx: Transaction<'_>, operation: &str) {
    if let Err(e) = tx.rollback().await {
        tracing::error!("failed to roll back {}: {}", operation, e);
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn create_note(&mut self, content: String) -> Result<Note, RepositoryError> {
        self.ensure_open()?;
        let tx = self.client.transaction().await?;

        let result = tx
            .query_one(INSERT_NOTE, &[&content])
            .await
            .and_then(|row| Note::try_from(&row));

        match result {
            Ok(note) => {
                tx.commit().await?;
                Ok(note)
            }
            Err(e) => {
                rollback(tx, "note creation").await;
                Err(e.into())
            }
        }
    }

    async fn update_note(
        &mut self,
        id: i64,
        content: String,
    ) -> Result<Option<Note>, RepositoryError> {
        self.ensure_open()?;
        let tx = self.client.transaction().await?;

        let result = tx
            .query_opt(UPDATE_NOTE, &[&content, &id])
            .await
            .and_then(|row| row.as_ref().map(Note::try_from).transpose());

        match result {
            Ok(note) => {
                tx.commit().await?;
                Ok(note)
            }
            Err(e) => {
                rollback(tx, "note update").await;
                Err(e.into())
            }
        }
    }

    async fn delete_note(&mut self, id: i64) -> Result<bool, RepositoryError> {
        self.ensure_open()?;
        let tx = self.client.transaction().await?;

        match tx.execute(DELETE_NOTE, &[&id]).await {
            Ok(rows) => {
                tx.commit().await?;
                Ok(rows == 1)
            }
            Err(e) => {
                rollback(tx, "note deletion").await;
                Err(e.into())
            }
        }
    }

    async fn get_one_note(&mut self, id: i64) -> Result<Option<Note>, RepositoryError> {
        self.ensure_open()?;
        let row = self.client.query_opt(SELECT_NOTE, &[&id]).await?;

        Ok(row.as_ref().map(Note::try_from).transpose()?)
    }

    async fn get_all_notes(&mut self) -> Result<Vec<Note>, RepositoryError> {
        self.ensure_open()?;
        let rows = self.client.query(SELECT_NOTES, &[]).await?;

        let mut vec: Vec<Note> = Vec::with_capacity(rows.len());

        for row in &rows {
            vec.push(Note::try_from(row)?);
        }

        Ok(vec)
    }
}
