// src/application/services.rs
use crate::domain::{DomainError, Identity, NewNote, Note, NoteId};
use async_trait::async_trait;
use reqwest::Url;

/// Supplies the identity of the signed-in user
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_identity(&self) -> Result<Identity, DomainError>;

    /// End the current session; signing out while signed out succeeds
    async fn sign_out(&self) -> Result<(), DomainError>;
}

/// Key-addressed blob storage for note images
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`, replacing any existing object
    async fn upload(&self, key: &str, data: &[u8]) -> Result<(), DomainError>;

    /// URL the object can be retrieved from
    async fn get_url(&self, key: &str) -> Result<Url, DomainError>;

    /// Remove the object; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}

/// Query/mutation interface over note records
#[async_trait]
pub trait NoteDirectory: Send + Sync {
    /// All notes, in the order the directory returns them
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError>;

    async fn create_note(&self, input: &NewNote) -> Result<Note, DomainError>;

    /// Returns the id of the deleted record
    async fn delete_note(&self, id: &NoteId) -> Result<NoteId, DomainError>;
}
