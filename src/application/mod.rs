// src/application/mod.rs
pub mod notes_view;
pub mod services;
pub mod view_state;

pub use notes_view::NotesView;
pub use services::{IdentityProvider, NoteDirectory, ObjectStore};
pub use view_state::{NotesState, ViewEvent};
