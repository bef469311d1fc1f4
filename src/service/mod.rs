use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    repository::{NoteRepository, RepositoryError},
};

use std::sync::Arc;

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<tokio::sync::Mutex<dyn NoteRepository>>,
}

impl NoteService {
    pub fn new(repo: Arc<tokio::sync::Mutex<dyn NoteRepository>>) -> Self {
        Self { repo }
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, RepositoryError> {
        self.repo
            .lock()
            .await
            .create_note(request.content)
            .await
            .map(NoteResponse::from)
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<Option<NoteResponse>, RepositoryError> {
        self.repo
            .lock()
            .await
            .update_note(id, request.content)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    pub async fn delete_note(&self, id: i64) -> Result<bool, RepositoryError> {
        self.repo.lock().await.delete_note(id).await
    }

    pub async fn get_one_note(&self, id: i64) -> Result<Option<NoteResponse>, RepositoryError> {
        self.repo
            .lock()
            .await
            .get_one_note(id)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, RepositoryError> {
        self.repo
            .lock()
            .await
            .get_all_notes()
            .await
            .map(NoteResponse::from_notes)
    }
}
