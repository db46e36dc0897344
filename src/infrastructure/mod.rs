// src/infrastructure/mod.rs
pub mod config;
pub mod graphql;
pub mod object_store;
pub mod renderer;
pub mod session;

pub use config::{Config, StorageBackend};
pub use graphql::GraphQlNoteDirectory;
pub use object_store::{AnyObjectStore, FsObjectStore, HttpObjectStore};
pub use renderer::PageRenderer;
pub use session::SessionFileIdentity;
