use async_trait::async_trait;
use chrono::Utc;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use super::{NoteRepository, RepositoryError};
use crate::models::Note;

/// In-process stand-in for the database used by handler tests.
///
/// Writes are applied to a staged copy of the notes and only replace the
/// stored set on commit. `failure_switch` fails every operation up front;
/// `commit_failure_switch` lets writes run against the staged copy and then
/// discards it, like a transaction rolled back after a partial write.
#[derive(Default)]
pub struct MemoryNoteRepository {
    notes: Vec<Note>,
    last_id: i64,
    failing: Arc<AtomicBool>,
    failing_commits: Arc<AtomicBool>,
}

impl MemoryNoteRepository {
    pub fn failure_switch(&self) -> Arc<AtomicBool> {
        self.failing.clone()
    }

    pub fn commit_failure_switch(&self) -> Arc<AtomicBool> {
        self.failing_commits.clone()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConnectionClosed);
        }
        Ok(())
    }

    fn commit(&mut self, staged: Vec<Note>) -> Result<(), RepositoryError> {
        if self.failing_commits.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConnectionClosed);
        }
        self.notes = staged;
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn create_note(&mut self, content: String) -> Result<Note, RepositoryError> {
        self.check()?;

        // Ids are consumed even when the write is rolled back.
        self.last_id += 1;
        let now = Utc::now();
        let note = Note {
            id: self.last_id,
            content,
            created_at: now,
            updated_at: now,
        };

        let mut staged = self.notes.clone();
        staged.push(note.clone());
        self.commit(staged)?;

        Ok(note)
    }

    async fn update_note(
        &mut self,
        id: i64,
        content: String,
    ) -> Result<Option<Note>, RepositoryError> {
        self.check()?;

        let mut staged = self.notes.clone();
        let updated = staged.iter_mut().find(|n| n.id == id).map(|note| {
            note.content = content;
            note.updated_at = Utc::now();
            note.clone()
        });
        self.commit(staged)?;

        Ok(updated)
    }

    async fn delete_note(&mut self, id: i64) -> Result<bool, RepositoryError> {
        self.check()?;

        let mut staged = self.notes.clone();
        staged.retain(|n| n.id != id);
        let deleted = staged.len() < self.notes.len();
        self.commit(staged)?;

        Ok(deleted)
    }

    async fn get_one_note(&mut self, id: i64) -> Result<Option<Note>, RepositoryError> {
        self.check()?;
        Ok(self.notes.iter().find(|n| n.id == id).cloned())
    }

    async fn get_all_notes(&mut self) -> Result<Vec<Note>, RepositoryError> {
        self.check()?;
        Ok(self.notes.clone())
    }
}
