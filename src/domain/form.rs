// src/domain/form.rs
use crate::domain::{DomainError, NewNote};
use std::path::Path;

/// An image file attached to the create form
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { file_name, data })
    }
}

/// Values submitted through the create form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteForm {
    pub name: String,
    pub description: String,
    pub image: Option<Attachment>,
}

impl NoteForm {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, attachment: Attachment) -> Self {
        self.image = Some(attachment);
        self
    }

    /// Attachment that should be uploaded, if any.
    /// A file input with nothing selected yields an empty file name.
    pub fn attachment(&self) -> Option<&Attachment> {
        self.image
            .as_ref()
            .filter(|attachment| !attachment.file_name.is_empty())
    }

    /// Name and description are required fields
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidNote("name is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::InvalidNote(
                "description is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_new_note(&self) -> NewNote {
        NewNote {
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.attachment().map(|a| a.file_name.clone()),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
