use anyhow::{Context, Result};
use notesview::application::NotesView;
use notesview::domain::{Note, NoteId};
use notesview::infrastructure::{FsObjectStore, SessionFileIdentity};
use notesview::util::testing::MockNoteDirectory;
use std::path::PathBuf;
use tempfile::TempDir;

pub type TestView = NotesView<SessionFileIdentity, FsObjectStore, MockNoteDirectory>;

/// Temp workspace holding a session file and a bucket directory
#[allow(dead_code)]
pub struct TestWorkspace {
    _temp_dir: TempDir,
    pub session_file: PathBuf,
    pub bucket_dir: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let session_file = temp_dir.path().join("session.json");
        let bucket_dir = temp_dir.path().join("bucket");
        std::fs::create_dir_all(&bucket_dir).context("Failed to create bucket directory")?;

        Ok(Self {
            _temp_dir: temp_dir,
            session_file,
            bucket_dir,
        })
    }

    /// Write a session document for `username`
    pub fn sign_in(&self, username: &str) -> Result<()> {
        let session = serde_json::json!({
            "username": username,
            "userId": format!("{}-id", username),
            "signInDetails": { "loginId": format!("{}@example.test", username) }
        });
        std::fs::write(&self.session_file, session.to_string())
            .context("Failed to write session file")
    }

    /// Put an object into the bucket directly
    pub fn put_object(&self, key: &str, data: &[u8]) -> Result<()> {
        std::fs::write(self.object_path(key)?, data).context("Failed to write object")
    }

    pub fn object_exists(&self, key: &str) -> bool {
        self.object_path(key).is_ok_and(|path| path.exists())
    }

    fn object_path(&self, key: &str) -> Result<PathBuf> {
        Ok(FsObjectStore::new(&self.bucket_dir).object_path(key)?)
    }

    pub fn view(&self, directory: MockNoteDirectory) -> TestView {
        NotesView::new(
            SessionFileIdentity::new(&self.session_file),
            FsObjectStore::new(&self.bucket_dir),
            directory,
        )
    }
}

#[allow(dead_code)]
pub fn note(id: &str, name: &str, image: Option<&str>) -> Note {
    Note {
        id: NoteId::from(id),
        name: name.to_string(),
        description: format!("about {}", name),
        image: image.map(str::to_string),
    }
}
