// src/application/view_state.rs
use crate::domain::{Note, NoteId};
use serde::Serialize;
use std::collections::HashMap;

/// Events that change what the view displays
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    FetchSucceeded(Vec<Note>),
    IdentityResolved(String),
    DeleteRequested(NoteId),
    DeleteConfirmed(NoteId),
    DeleteFailed { id: NoteId, reason: String },
    ErrorDismissed,
    SignedOut,
}

/// A note hidden by a delete that the backend has not confirmed yet
#[derive(Debug, Clone, PartialEq)]
struct PendingDelete {
    index: usize,
    note: Note,
}

/// Snapshot of everything the view renders.
///
/// The note list is a client-side cache of the directory and may briefly
/// disagree with it while deletes are in flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotesState {
    pub notes: Vec<Note>,
    pub user_name: String,
    pub errors: Vec<String>,
    #[serde(skip)]
    pending_deletes: HashMap<NoteId, PendingDelete>,
}

impl NotesState {
    pub fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::FetchSucceeded(notes) => {
                self.notes = notes
                    .into_iter()
                    .filter(|note| !self.pending_deletes.contains_key(&note.id))
                    .collect();
            }
            ViewEvent::IdentityResolved(user_name) => {
                self.user_name = user_name;
            }
            ViewEvent::DeleteRequested(id) => {
                if let Some(index) = self.notes.iter().position(|note| note.id == id) {
                    let note = self.notes.remove(index);
                    self.pending_deletes
                        .insert(id, PendingDelete { index, note });
                }
            }
            ViewEvent::DeleteConfirmed(id) => {
                self.pending_deletes.remove(&id);
            }
            ViewEvent::DeleteFailed { id, reason } => {
                if let Some(pending) = self.pending_deletes.remove(&id) {
                    let message =
                        format!("Failed to delete note '{}': {}", pending.note.name, reason);
                    if !self.notes.iter().any(|note| note.id == id) {
                        let index = pending.index.min(self.notes.len());
                        self.notes.insert(index, pending.note);
                    }
                    self.errors.push(message);
                } else {
                    self.errors
                        .push(format!("Failed to delete note {}: {}", id, reason));
                }
            }
            ViewEvent::ErrorDismissed => {
                self.errors.clear();
            }
            ViewEvent::SignedOut => {
                *self = Self::default();
            }
        }
    }

    pub fn is_delete_pending(&self, id: &NoteId) -> bool {
        self.pending_deletes.contains_key(id)
    }

    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, name: &str) -> Note {
        Note {
            id: NoteId::from(id),
            name: name.to_string(),
            description: "d".to_string(),
            image: None,
        }
    }

    fn ids(state: &NotesState) -> Vec<&str> {
        state.notes.iter().map(|n| n.id.as_str()).collect()
    }

    fn loaded(notes: Vec<Note>) -> NotesState {
        let mut state = NotesState::default();
        state.apply(ViewEvent::FetchSucceeded(notes));
        state
    }

    #[test]
    fn given_two_notes_when_delete_requested_then_note_removed_immediately() {
        // Arrange
        let mut state = loaded(vec![note("1", "a"), note("2", "b")]);

        // Act
        state.apply(ViewEvent::DeleteRequested(NoteId::from("1")));

        // Assert
        assert_eq!(ids(&state), vec!["2"]);
        assert!(state.is_delete_pending(&NoteId::from("1")));
    }

    #[test]
    fn given_pending_delete_when_confirmed_then_note_stays_removed() {
        let mut state = loaded(vec![note("1", "a"), note("2", "b")]);
        state.apply(ViewEvent::DeleteRequested(NoteId::from("1")));

        state.apply(ViewEvent::DeleteConfirmed(NoteId::from("1")));

        assert_eq!(ids(&state), vec!["2"]);
        assert!(!state.is_delete_pending(&NoteId::from("1")));
        assert!(state.errors.is_empty());
    }

    #[test]
    fn given_pending_delete_when_failed_then_note_reinserted_at_original_position() {
        // Arrange
        let mut state = loaded(vec![note("1", "a"), note("2", "b"), note("3", "c")]);
        state.apply(ViewEvent::DeleteRequested(NoteId::from("2")));

        // Act
        state.apply(ViewEvent::DeleteFailed {
            id: NoteId::from("2"),
            reason: "timeout".to_string(),
        });

        // Assert
        assert_eq!(ids(&state), vec!["1", "2", "3"]);
        assert_eq!(state.errors.len(), 1);
        assert!(state.errors[0].contains("'b'"));
        assert!(state.errors[0].contains("timeout"));
    }

    #[test]
    fn given_list_shrunk_meanwhile_when_delete_failed_then_index_is_clamped() {
        let mut state = loaded(vec![note("1", "a"), note("2", "b"), note("3", "c")]);
        state.apply(ViewEvent::DeleteRequested(NoteId::from("3")));
        state.apply(ViewEvent::DeleteRequested(NoteId::from("1")));

        state.apply(ViewEvent::DeleteFailed {
            id: NoteId::from("3"),
            reason: "boom".to_string(),
        });

        assert_eq!(ids(&state), vec!["2", "3"]);
    }

    #[test]
    fn given_pending_delete_when_fetch_succeeds_then_note_stays_hidden() {
        let mut state = loaded(vec![note("1", "a"), note("2", "b")]);
        state.apply(ViewEvent::DeleteRequested(NoteId::from("1")));

        state.apply(ViewEvent::FetchSucceeded(vec![note("1", "a"), note("2", "b")]));

        assert_eq!(ids(&state), vec!["2"]);
    }

    #[test]
    fn given_unknown_id_when_delete_requested_then_state_unchanged() {
        let mut state = loaded(vec![note("1", "a")]);

        state.apply(ViewEvent::DeleteRequested(NoteId::from("9")));

        assert_eq!(ids(&state), vec!["1"]);
        assert!(!state.is_delete_pending(&NoteId::from("9")));
    }

    #[test]
    fn given_loaded_state_when_signed_out_then_everything_cleared() {
        let mut state = loaded(vec![note("1", "a"), note("2", "b")]);
        state.apply(ViewEvent::IdentityResolved("alice".to_string()));
        state.apply(ViewEvent::DeleteRequested(NoteId::from("1")));

        state.apply(ViewEvent::SignedOut);

        assert_eq!(state, NotesState::default());
        assert!(!state.is_delete_pending(&NoteId::from("1")));
    }

    #[test]
    fn given_errors_when_dismissed_then_cleared() {
        let mut state = NotesState::default();
        state.apply(ViewEvent::DeleteFailed {
            id: NoteId::from("9"),
            reason: "gone".to_string(),
        });
        assert_eq!(state.errors.len(), 1);

        state.apply(ViewEvent::ErrorDismissed);

        assert!(state.errors.is_empty());
    }
}
