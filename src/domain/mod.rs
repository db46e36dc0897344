// src/domain/mod.rs
pub mod error;
pub mod form;
pub mod identity;
pub mod note;

pub use error::DomainError;
pub use form::{Attachment, NoteForm};
pub use identity::{Identity, SignInDetails};
pub use note::{NewNote, Note, NoteId};
