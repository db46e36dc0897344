// src/ports/html.rs
use crate::application::NotesState;
use crate::domain::Note;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    fn render_note(&self, note: &Note) -> String {
        let image = match note.image() {
            Some(url) => format!(
                r#"
            <img src="{src}" alt="visual aid for {alt}">"#,
                src = encode_double_quoted_attribute(url),
                alt = encode_double_quoted_attribute(&note.name),
            ),
            None => String::new(),
        };

        format!(
            r#"        <div class="note" data-id="{id}">
            <strong>{name}</strong>
            <span>{description}</span>{image}
        </div>
"#,
            id = encode_double_quoted_attribute(note.id.as_str()),
            name = encode_text(&note.name),
            description = encode_text(&note.description),
            image = image,
        )
    }

    fn render_errors(&self, errors: &[String]) -> String {
        if errors.is_empty() {
            return String::new();
        }
        let items: String = errors
            .iter()
            .map(|error| format!("        <li>{}</li>\n", encode_text(error)))
            .collect();
        format!("    <ul class=\"errors\">\n{}    </ul>\n", items)
    }

    #[instrument(level = "debug", skip(self, state), fields(notes = state.notes.len()))]
    pub fn render(&self, state: &NotesState) -> String {
        let notes: String = if state.notes.is_empty() {
            "        <p class=\"empty\">No notes yet</p>\n".to_string()
        } else {
            state.notes.iter().map(|note| self.render_note(note)).collect()
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>My Notes</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 2rem auto;
            padding: 0 1rem;
            text-align: center;
        }}
        .note {{
            display: flex;
            gap: 1rem;
            justify-content: center;
            align-items: center;
            margin: 1rem 0;
        }}
        .note img {{
            width: 400px;
        }}
        .errors {{
            color: #b00020;
            list-style: none;
            padding: 0;
        }}
    </style>
</head>
<body>
    <h1>My Notes</h1>
    <h3>User Name: {user_name}</h3>
{errors}    <h2>Current Notes</h2>
    <div class="notes">
{notes}    </div>
</body>
</html>"#,
            user_name = encode_text(&state.user_name),
            errors = self.render_errors(&state.errors),
            notes = notes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ViewEvent;
    use crate::domain::NoteId;
    use rstest::rstest;

    fn note(name: &str, description: &str, image: Option<&str>) -> Note {
        Note {
            id: NoteId::from("1"),
            name: name.to_string(),
            description: description.to_string(),
            image: image.map(str::to_string),
        }
    }

    #[rstest]
    #[case("<b>bold</b>", "&lt;b&gt;bold&lt;/b&gt;")]
    #[case("fish & chips", "fish &amp; chips")]
    #[case("plain", "plain")]
    fn test_note_text_is_escaped(#[case] name: &str, #[case] expected: &str) {
        let presenter = HtmlPresenter::new();

        let html = presenter.render_note(&note(name, "d", None));

        assert!(html.contains(&format!("<strong>{}</strong>", expected)));
    }

    #[test]
    fn given_note_without_image_when_rendering_then_no_img_tag() {
        let presenter = HtmlPresenter::new();

        let html = presenter.render_note(&note("a", "d", None));

        assert!(!html.contains("<img"));
    }

    #[test]
    fn given_note_with_url_when_rendering_then_img_points_at_url() {
        let presenter = HtmlPresenter::new();

        let html = presenter.render_note(&note(
            "cat",
            "d",
            Some("https://bucket.example.test/public/cat?x=1&y=2"),
        ));

        assert!(html.contains(r#"src="https://bucket.example.test/public/cat?x=1&amp;y=2""#));
        assert!(html.contains(r#"alt="visual aid for cat""#));
    }

    #[test]
    fn given_errors_when_rendering_then_listed() {
        let presenter = HtmlPresenter::new();
        let mut state = NotesState::default();
        state.apply(ViewEvent::DeleteFailed {
            id: NoteId::from("9"),
            reason: "boom".to_string(),
        });

        let html = presenter.render(&state);

        assert!(html.contains("<ul class=\"errors\">"));
        assert!(html.contains("<li>Failed to delete note 9: boom</li>"));
    }
}
