// src/infrastructure/object_store.rs
use crate::application::ObjectStore;
use crate::domain::DomainError;
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{StatusCode, Url};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Object keys are note names; they become a single path segment.
fn validate_key(key: &str) -> Result<(), DomainError> {
    if key.is_empty() || key == "." || key == ".." {
        return Err(DomainError::Storage(format!("invalid object key: {:?}", key)));
    }
    Ok(())
}

/// Bucket reachable over HTTP: `PUT` to upload, `DELETE` to remove, and the
/// object URL itself as the retrieval URL.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: Url,
    prefix: String,
    auth_token: Option<String>,
}

impl HttpObjectStore {
    pub fn new(base_url: &str, prefix: &str) -> Result<Self, DomainError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            DomainError::Config(format!("invalid storage base_url {:?}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::Config(format!(
                "storage base_url cannot be a base: {}",
                base_url
            )));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            prefix: prefix.to_string(),
            auth_token: None,
        })
    }

    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    /// `<base_url>/<prefix segments>/<key>`, with the key percent-encoded as
    /// one segment
    pub fn object_url(&self, key: &str) -> Result<Url, DomainError> {
        validate_key(key)?;
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DomainError::Storage(format!("cannot build URL from {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(self.prefix.split('/').filter(|segment| !segment.is_empty()))
            .push(key);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, token),
            None => request,
        }
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    #[instrument(level = "debug", skip(self, data), fields(bytes = data.len()))]
    async fn upload(&self, key: &str, data: &[u8]) -> Result<(), DomainError> {
        let url = self.object_url(key)?;
        let response = self
            .authorize(self.client.put(url.clone()))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| DomainError::Storage(format!("upload of {} failed: {}", key, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Storage(format!(
                "upload of {} returned HTTP {}: {}",
                key, status, body
            )));
        }
        info!(%url, "Uploaded object");
        Ok(())
    }

    async fn get_url(&self, key: &str) -> Result<Url, DomainError> {
        self.object_url(key)
    }

    #[instrument(level = "debug", skip(self))]
    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let url = self.object_url(key)?;
        let response = self
            .authorize(self.client.delete(url.clone()))
            .send()
            .await
            .map_err(|e| DomainError::Storage(format!("remove of {} failed: {}", key, e)))?;

        match response.status() {
            status if status.is_success() => {
                info!(%url, "Removed object");
                Ok(())
            }
            StatusCode::NOT_FOUND => {
                debug!(%url, "Object already absent");
                Ok(())
            }
            status => Err(DomainError::Storage(format!(
                "remove of {} returned HTTP {}",
                key, status
            ))),
        }
    }
}

/// Everything but ASCII alphanumerics, `-` and `_`
const FILE_NAME: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// A local directory used as a bucket. Retrieval URLs are `file://` URLs.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The key percent-encoded into one file name directly under the root.
    /// Separators and dots are encoded, so no key can leave the root.
    pub fn object_path(&self, key: &str) -> Result<PathBuf, DomainError> {
        if key.is_empty() {
            return Err(DomainError::Storage("empty object key".to_string()));
        }
        let file_name = utf8_percent_encode(key, FILE_NAME).to_string();
        Ok(self.root.join(file_name))
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    #[instrument(level = "debug", skip(self, data), fields(bytes = data.len()))]
    async fn upload(&self, key: &str, data: &[u8]) -> Result<(), DomainError> {
        let path = self.object_path(key)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| {
                DomainError::Storage(format!("cannot create {}: {}", self.root.display(), e))
            })?;
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| {
                DomainError::Storage(format!("cannot write {}: {}", path.display(), e))
            })?;
        info!(path = %path.display(), "Stored object");
        Ok(())
    }

    async fn get_url(&self, key: &str) -> Result<Url, DomainError> {
        let path = self.object_path(key)?;
        let absolute = std::path::absolute(&path)
            .map_err(|e| {
                DomainError::Storage(format!("cannot resolve {}: {}", path.display(), e))
            })?;
        Url::from_file_path(&absolute)
            .map_err(|_| {
                DomainError::Storage(format!("no file URL for {}", absolute.display()))
            })
    }

    #[instrument(level = "debug", skip(self))]
    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let path = self.object_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "Removed object");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Object already absent");
                Ok(())
            }
            Err(e) => Err(DomainError::Storage(format!(
                "cannot remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Object store selected by configuration
#[derive(Debug, Clone)]
pub enum AnyObjectStore {
    Http(HttpObjectStore),
    Fs(FsObjectStore),
}

#[async_trait]
impl ObjectStore for AnyObjectStore {
    async fn upload(&self, key: &str, data: &[u8]) -> Result<(), DomainError> {
        match self {
            Self::Http(store) => store.upload(key, data).await,
            Self::Fs(store) => store.upload(key, data).await,
        }
    }

    async fn get_url(&self, key: &str) -> Result<Url, DomainError> {
        match self {
            Self::Http(store) => store.get_url(key).await,
            Self::Fs(store) => store.get_url(key).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        match self {
            Self::Http(store) => store.remove(key).await,
            Self::Fs(store) => store.remove(key).await,
        }
    }
}
