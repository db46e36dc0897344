// src/infrastructure/session.rs
use crate::application::IdentityProvider;
use crate::domain::{DomainError, Identity};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Reads the current identity from the session document cached by the hosted
/// sign-in flow.
///
/// The document is JSON shaped like `{"username", "userId", "signInDetails"}`.
/// A missing file means nobody is signed in.
#[derive(Debug, Clone)]
pub struct SessionFileIdentity {
    path: PathBuf,
}

impl SessionFileIdentity {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl IdentityProvider for SessionFileIdentity {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    async fn current_identity(&self) -> Result<Identity, DomainError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No session file");
                return Err(DomainError::NotSignedIn);
            }
            Err(e) => {
                return Err(DomainError::Identity(format!(
                    "Failed to read session file {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let identity: Identity = serde_json::from_str(&content).map_err(|e| {
            DomainError::Identity(format!("Malformed session file: {}", e))
        })?;

        if identity.username.is_empty() {
            return Err(DomainError::NotSignedIn);
        }
        Ok(identity)
    }

    /// Removes the session document
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    async fn sign_out(&self) -> Result<(), DomainError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Removed session file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No session file, already signed out");
                Ok(())
            }
            Err(e) => Err(DomainError::Identity(format!(
                "Failed to remove session file {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
