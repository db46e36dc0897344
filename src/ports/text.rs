// src/ports/text.rs
use crate::application::NotesState;

/// Tab-separated listing for the terminal: id, name, description, image
#[derive(Debug, Default)]
pub struct TextPresenter;

impl TextPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, state: &NotesState) -> String {
        let mut out = String::new();
        if !state.user_name.is_empty() {
            out.push_str(&format!("User Name: {}\n", state.user_name));
        }
        for error in &state.errors {
            out.push_str(&format!("error: {}\n", error));
        }
        for note in &state.notes {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                note.id,
                single_line(&note.name),
                single_line(&note.description),
                note.image().unwrap_or("-"),
            ));
        }
        out
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ViewEvent;
    use crate::domain::{Note, NoteId};

    #[test]
    fn given_notes_when_rendering_then_one_line_per_note() {
        let mut state = NotesState::default();
        state.apply(ViewEvent::IdentityResolved("alice".to_string()));
        state.apply(ViewEvent::FetchSucceeded(vec![
            Note {
                id: NoteId::from("1"),
                name: "a".to_string(),
                description: "line one\nline two".to_string(),
                image: None,
            },
            Note {
                id: NoteId::from("2"),
                name: "b".to_string(),
                description: "e".to_string(),
                image: Some("file:///tmp/b".to_string()),
            },
        ]));

        let text = TextPresenter::new().render(&state);

        assert_eq!(
            text,
            "User Name: alice\n1\ta\tline one line two\t-\n2\tb\te\tfile:///tmp/b\n"
        );
    }

    #[test]
    fn given_empty_state_when_rendering_then_empty_output() {
        assert_eq!(TextPresenter::new().render(&NotesState::default()), "");
    }
}
