// src/application/notes_view.rs
use crate::application::view_state::{NotesState, ViewEvent};
use crate::application::{IdentityProvider, NoteDirectory, ObjectStore};
use crate::domain::{DomainError, Identity, Note, NoteForm};
use futures_util::future::try_join_all;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Mediates between user actions and the remote services.
///
/// All collaborators are handed in at construction. State changes are
/// published through a watch channel so a renderer sees every update as soon
/// as it is applied, including the optimistic removal of a note.
pub struct NotesView<I, S, D> {
    identity: I,
    store: S,
    directory: D,
    state: watch::Sender<NotesState>,
}

impl<I, S, D> NotesView<I, S, D>
where
    I: IdentityProvider,
    S: ObjectStore,
    D: NoteDirectory,
{
    pub fn new(identity: I, store: S, directory: D) -> Self {
        let (state, _) = watch::channel(NotesState::default());
        Self {
            identity,
            store,
            directory,
            state,
        }
    }

    /// Current snapshot of the view state
    pub fn state(&self) -> NotesState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NotesState> {
        self.state.subscribe()
    }

    fn dispatch(&self, event: ViewEvent) {
        debug!(?event, "Applying view event");
        self.state.send_modify(|state| state.apply(event));
    }

    /// Load notes and the signed-in user concurrently.
    ///
    /// A failing identity lookup is logged and leaves the user name empty;
    /// a failing note fetch is returned.
    #[instrument(level = "debug", skip(self))]
    pub async fn initialize(&mut self) -> Result<(), DomainError> {
        let (notes, user_name) = tokio::join!(self.load_notes(), self.resolve_user_name());

        if let Some(user_name) = user_name {
            self.dispatch(ViewEvent::IdentityResolved(user_name));
        }
        self.dispatch(ViewEvent::FetchSucceeded(notes?));
        Ok(())
    }

    /// Replace the displayed list with the directory's contents.
    ///
    /// The list only becomes visible once every image URL is resolved. If any
    /// resolution fails the displayed list is left as it was.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_notes(&mut self) -> Result<(), DomainError> {
        let notes = self.load_notes().await?;
        self.dispatch(ViewEvent::FetchSucceeded(notes));
        Ok(())
    }

    /// Upload the attached image (if any), create the record, re-fetch, and
    /// reset the form. Steps run strictly in that order.
    #[instrument(level = "debug", skip(self, form), fields(name = %form.name))]
    pub async fn create_note(&mut self, form: &mut NoteForm) -> Result<Note, DomainError> {
        form.validate()?;
        let input = form.to_new_note();

        if let Some(attachment) = form.attachment() {
            debug!(key = %form.name, file_name = %attachment.file_name, "Uploading image");
            self.store.upload(&form.name, &attachment.data).await?;
        }

        let created = self.directory.create_note(&input).await?;
        info!(note_id = %created.id, name = %created.name, "Created note");

        self.fetch_notes().await?;
        form.reset();
        Ok(created)
    }

    /// Remove the note from the displayed list, then from the object store,
    /// then from the directory.
    ///
    /// The list changes before any remote call is issued. If a remote call
    /// fails the note is put back and the error is recorded in the state.
    #[instrument(level = "debug", skip(self, note), fields(note_id = %note.id))]
    pub async fn delete_note(&mut self, note: &Note) -> Result<(), DomainError> {
        self.dispatch(ViewEvent::DeleteRequested(note.id.clone()));

        match self.remove_remote(note).await {
            Ok(()) => {
                info!(note_id = %note.id, name = %note.name, "Deleted note");
                self.dispatch(ViewEvent::DeleteConfirmed(note.id.clone()));
                Ok(())
            }
            Err(e) => {
                warn!(note_id = %note.id, error = %e, "Delete failed, restoring note");
                self.dispatch(ViewEvent::DeleteFailed {
                    id: note.id.clone(),
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    pub fn dismiss_errors(&mut self) {
        self.dispatch(ViewEvent::ErrorDismissed);
    }

    pub async fn current_user(&self) -> Result<Identity, DomainError> {
        self.identity.current_identity().await
    }

    /// End the session and clear everything the view displays
    #[instrument(level = "debug", skip(self))]
    pub async fn sign_out(&mut self) -> Result<(), DomainError> {
        self.identity.sign_out().await?;
        info!("Signed out");
        self.dispatch(ViewEvent::SignedOut);
        Ok(())
    }

    async fn remove_remote(&self, note: &Note) -> Result<(), DomainError> {
        self.store.remove(note.image_key()).await?;
        self.directory.delete_note(&note.id).await?;
        Ok(())
    }

    async fn load_notes(&self) -> Result<Vec<Note>, DomainError> {
        let notes = self.directory.list_notes().await?;
        debug!(count = notes.len(), "Fetched notes");
        try_join_all(notes.into_iter().map(|note| self.resolve_image(note))).await
    }

    async fn resolve_image(&self, mut note: Note) -> Result<Note, DomainError> {
        if note.image().is_none() {
            note.image = None;
            return Ok(note);
        }
        let url = self.store.get_url(note.image_key()).await?;
        note.image = Some(url.to_string());
        Ok(note)
    }

    async fn resolve_user_name(&self) -> Option<String> {
        match self.identity.current_identity().await {
            Ok(identity) => {
                info!(
                    username = %identity.username,
                    user_id = %identity.user_id,
                    sign_in_details = ?identity.sign_in_details,
                    "Resolved current identity"
                );
                Some(identity.username)
            }
            Err(e) => {
                warn!(error = %e, "Could not resolve current identity");
                None
            }
        }
    }
}
