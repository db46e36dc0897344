// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Url;
use std::collections::HashSet;
use std::env;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{IdentityProvider, NoteDirectory, ObjectStore};
use crate::domain::{DomainError, Identity, NewNote, Note, NoteId, SignInDetails};

/// Base URL the mock object store resolves keys against
pub const MOCK_STORAGE_URL: &str = "https://storage.example.test/public/";

/// Shared, clonable record of calls made to a mock
#[derive(Debug)]
pub struct CallLog<T>(Arc<Mutex<Vec<T>>>);

impl<T> Clone for CallLog<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Default for CallLog<T> {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }
}

impl<T: Clone> CallLog<T> {
    pub fn calls(&self) -> Vec<T> {
        self.0.lock().expect("call log poisoned").clone()
    }

    fn record(&self, call: T) {
        self.0.lock().expect("call log poisoned").push(call);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Upload { key: String, data: Vec<u8> },
    GetUrl { key: String },
    Remove { key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryCall {
    List,
    Create(NewNote),
    Delete(NoteId),
}

/// Mock identity provider: either signed in as a fixed user or signed out
pub struct MockIdentityProvider {
    identity: Mutex<Option<Identity>>,
}

impl MockIdentityProvider {
    pub fn signed_in(username: &str) -> Self {
        Self {
            identity: Mutex::new(Some(Identity {
                username: username.to_string(),
                user_id: format!("{}-id", username),
                sign_in_details: Some(SignInDetails {
                    login_id: Some(format!("{}@example.test", username)),
                    auth_flow_type: Some("USER_SRP_AUTH".to_string()),
                }),
            })),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            identity: Mutex::new(None),
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn current_identity(&self) -> Result<Identity, DomainError> {
        self.identity
            .lock()
            .expect("identity poisoned")
            .clone()
            .ok_or(DomainError::NotSignedIn)
    }

    async fn sign_out(&self) -> Result<(), DomainError> {
        *self.identity.lock().expect("identity poisoned") = None;
        Ok(())
    }
}

/// Shared mock object store for testing the notes view
///
/// Records every call and resolves keys against [`MOCK_STORAGE_URL`].
///
/// # Examples
///
/// ```
/// use notesview::util::testing::MockObjectStore;
///
/// let store = MockObjectStore::builder()
///     .with_url_failure("broken")
///     .build();
/// let log = store.log();
/// assert!(log.calls().is_empty());
/// ```
pub struct MockObjectStore {
    log: CallLog<StoreCall>,
    base_url: Url,
    url_failures: HashSet<String>,
    fail_upload: bool,
    fail_remove: bool,
    remove_gate: Option<Arc<Notify>>,
}

impl MockObjectStore {
    pub fn builder() -> MockObjectStoreBuilder {
        MockObjectStoreBuilder::new()
    }

    pub fn log(&self) -> CallLog<StoreCall> {
        self.log.clone()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn upload(&self, key: &str, data: &[u8]) -> Result<(), DomainError> {
        self.log.record(StoreCall::Upload {
            key: key.to_string(),
            data: data.to_vec(),
        });
        if self.fail_upload {
            return Err(DomainError::Storage(format!("upload of {} rejected", key)));
        }
        Ok(())
    }

    async fn get_url(&self, key: &str) -> Result<Url, DomainError> {
        self.log.record(StoreCall::GetUrl {
            key: key.to_string(),
        });
        if self.url_failures.contains(key) {
            return Err(DomainError::Storage(format!("no URL for {}", key)));
        }
        self.base_url
            .join(key)
            .map_err(|e| DomainError::Storage(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.log.record(StoreCall::Remove {
            key: key.to_string(),
        });
        if let Some(gate) = &self.remove_gate {
            gate.notified().await;
        }
        if self.fail_remove {
            return Err(DomainError::Storage(format!("remove of {} rejected", key)));
        }
        Ok(())
    }
}

/// Builder for MockObjectStore
pub struct MockObjectStoreBuilder {
    url_failures: HashSet<String>,
    fail_upload: bool,
    fail_remove: bool,
    remove_gate: Option<Arc<Notify>>,
}

impl MockObjectStoreBuilder {
    pub fn new() -> Self {
        Self {
            url_failures: HashSet::new(),
            fail_upload: false,
            fail_remove: false,
            remove_gate: None,
        }
    }

    /// Make get_url fail for a specific key
    pub fn with_url_failure(mut self, key: &str) -> Self {
        self.url_failures.insert(key.to_string());
        self
    }

    pub fn with_upload_failure(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    pub fn with_remove_failure(mut self) -> Self {
        self.fail_remove = true;
        self
    }

    /// Block remove until the gate is notified
    pub fn with_remove_gate(mut self, gate: Arc<Notify>) -> Self {
        self.remove_gate = Some(gate);
        self
    }

    pub fn build(self) -> MockObjectStore {
        MockObjectStore {
            log: CallLog::default(),
            base_url: Url::parse(MOCK_STORAGE_URL).expect("mock storage URL is valid"),
            url_failures: self.url_failures,
            fail_upload: self.fail_upload,
            fail_remove: self.fail_remove,
            remove_gate: self.remove_gate,
        }
    }
}

impl Default for MockObjectStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory note directory that records calls.
///
/// Created notes get sequential ids (`generated-1`, ...) and show up in
/// later listings; deleted notes disappear from them.
pub struct MockNoteDirectory {
    log: CallLog<DirectoryCall>,
    notes: Mutex<Vec<Note>>,
    next_id: Mutex<u32>,
    fail_list: bool,
    fail_create: bool,
    delete_failures: HashSet<NoteId>,
}

impl MockNoteDirectory {
    pub fn builder() -> MockNoteDirectoryBuilder {
        MockNoteDirectoryBuilder::new()
    }

    pub fn log(&self) -> CallLog<DirectoryCall> {
        self.log.clone()
    }
}

#[async_trait]
impl NoteDirectory for MockNoteDirectory {
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        self.log.record(DirectoryCall::List);
        if self.fail_list {
            return Err(DomainError::Directory("listTodos failed".to_string()));
        }
        Ok(self.notes.lock().expect("notes poisoned").clone())
    }

    async fn create_note(&self, input: &NewNote) -> Result<Note, DomainError> {
        self.log.record(DirectoryCall::Create(input.clone()));
        if self.fail_create {
            return Err(DomainError::Directory("createTodo failed".to_string()));
        }
        let mut next_id = self.next_id.lock().expect("id counter poisoned");
        *next_id += 1;
        let note = Note {
            id: NoteId(format!("generated-{}", next_id)),
            name: input.name.clone(),
            description: input.description.clone(),
            image: input.image.clone(),
        };
        self.notes.lock().expect("notes poisoned").push(note.clone());
        Ok(note)
    }

    async fn delete_note(&self, id: &NoteId) -> Result<NoteId, DomainError> {
        self.log.record(DirectoryCall::Delete(id.clone()));
        if self.delete_failures.contains(id) {
            return Err(DomainError::Directory(format!("deleteTodo {} failed", id)));
        }
        let mut notes = self.notes.lock().expect("notes poisoned");
        let before = notes.len();
        notes.retain(|note| &note.id != id);
        if notes.len() == before {
            return Err(DomainError::NoteNotFound(id.to_string()));
        }
        Ok(id.clone())
    }
}

/// Builder for MockNoteDirectory
pub struct MockNoteDirectoryBuilder {
    notes: Vec<Note>,
    fail_list: bool,
    fail_create: bool,
    delete_failures: HashSet<NoteId>,
}

impl MockNoteDirectoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            fail_list: false,
            fail_create: false,
            delete_failures: HashSet::new(),
        }
    }

    /// Add a note returned by list_notes
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_list_failure(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn with_create_failure(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Configure delete_note to fail for a specific ID
    pub fn with_delete_failure(mut self, id: NoteId) -> Self {
        self.delete_failures.insert(id);
        self
    }

    pub fn build(self) -> MockNoteDirectory {
        MockNoteDirectory {
            log: CallLog::default(),
            notes: Mutex::new(self.notes),
            next_id: Mutex::new(0),
            fail_list: self.fail_list,
            fail_create: self.fail_create,
            delete_failures: self.delete_failures,
        }
    }
}

impl Default for MockNoteDirectoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    let noisy_modules = ["hyper", "reqwest", "mio", "rustls"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
