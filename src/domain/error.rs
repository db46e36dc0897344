// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No user is signed in")]
    NotSignedIn,
    #[error("Identity error: {0}")]
    Identity(String),
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("Invalid note: {0}")]
    InvalidNote(String),
    #[error("Note directory error: {0}")]
    Directory(String),
    #[error("Object store error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
