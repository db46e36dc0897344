// src/domain/note.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the note directory. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub String);

impl NoteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A note record as returned by the directory.
///
/// `image` holds the stored filename in the persisted form. Once the view has
/// fetched the note it holds the resolved retrieval URL instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Note {
    /// Image reference, with empty strings treated as absent
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|image| !image.is_empty())
    }

    /// Object store key for this note's image
    pub fn image_key(&self) -> &str {
        &self.name
    }
}

/// Input of the create mutation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNote {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
