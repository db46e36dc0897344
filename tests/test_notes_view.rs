mod helpers;

use anyhow::Result;
use helpers::{note, TestWorkspace};
use notesview::domain::{Attachment, DomainError, NoteForm, NoteId};
use notesview::util::testing::{DirectoryCall, MockNoteDirectory};
use reqwest::Url;

#[tokio::test]
async fn given_signed_in_user_with_image_note_when_initializing_then_image_is_file_url(
) -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    workspace.sign_in("alice")?;
    workspace.put_object("cat", b"png")?;
    let directory = MockNoteDirectory::builder()
        .with_note(note("1", "cat", Some("cat.png")))
        .with_note(note("2", "plain", None))
        .build();
    let mut view = workspace.view(directory);

    // Act
    view.initialize().await?;

    // Assert
    let state = view.state();
    assert_eq!(state.user_name, "alice");
    let image = state.notes[0].image.as_deref().expect("Image should resolve");
    assert!(image.starts_with("file://"));
    assert!(image.ends_with("/bucket/cat"));
    assert_eq!(state.notes[1].image, None);
    Ok(())
}

#[tokio::test]
async fn given_no_session_when_initializing_then_notes_load_without_user_name() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    let directory = MockNoteDirectory::builder()
        .with_note(note("1", "a", None))
        .build();
    let mut view = workspace.view(directory);

    view.initialize().await?;

    let state = view.state();
    assert_eq!(state.user_name, "");
    assert_eq!(state.notes.len(), 1);
    assert!(matches!(
        view.current_user().await,
        Err(DomainError::NotSignedIn)
    ));
    Ok(())
}

#[tokio::test]
async fn given_form_with_image_when_creating_then_object_stored_under_note_name() -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    workspace.sign_in("alice")?;
    let mut view = workspace.view(MockNoteDirectory::builder().build());
    view.initialize().await?;
    let mut form = NoteForm::new("sunset", "evening sky")
        .with_image(Attachment::new("IMG_0042.jpg", b"jpeg".to_vec()));

    // Act
    let created = view.create_note(&mut form).await?;

    // Assert
    assert_eq!(created.image.as_deref(), Some("IMG_0042.jpg"));
    assert!(workspace.object_exists("sunset"));
    assert!(!workspace.object_exists("IMG_0042.jpg"));
    let state = view.state();
    assert_eq!(state.notes.len(), 1);
    assert!(state.notes[0]
        .image
        .as_deref()
        .is_some_and(|url| url.ends_with("/bucket/sunset")));
    assert_eq!(form, NoteForm::default());
    Ok(())
}

#[tokio::test]
async fn given_note_with_image_when_deleting_then_object_and_record_removed() -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    workspace.put_object("cat", b"png")?;
    let directory = MockNoteDirectory::builder()
        .with_note(note("1", "cat", Some("cat.png")))
        .with_note(note("2", "dog", None))
        .build();
    let log = directory.log();
    let mut view = workspace.view(directory);
    view.initialize().await?;
    let target = view.state().notes[0].clone();

    // Act
    view.delete_note(&target).await?;

    // Assert
    assert!(!workspace.object_exists("cat"));
    assert!(log.calls().contains(&DirectoryCall::Delete(NoteId::from("1"))));
    let state = view.state();
    assert_eq!(state.notes.len(), 1);
    assert_eq!(state.notes[0].id, NoteId::from("2"));
    Ok(())
}

#[tokio::test]
async fn given_failing_directory_delete_when_deleting_then_note_restored() -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    let directory = MockNoteDirectory::builder()
        .with_note(note("1", "a", None))
        .with_delete_failure(NoteId::from("1"))
        .build();
    let mut view = workspace.view(directory);
    view.initialize().await?;

    // Act
    let result = view.delete_note(&note("1", "a", None)).await;

    // Assert
    assert!(result.is_err());
    let state = view.state();
    assert_eq!(state.notes.len(), 1);
    assert_eq!(state.errors.len(), 1);
    Ok(())
}

#[tokio::test]
async fn given_name_with_slash_and_no_image_when_deleting_then_note_removed() -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    let mut view = workspace.view(MockNoteDirectory::builder().build());
    view.create_note(&mut NoteForm::new("todo/home", "no image")).await?;
    let target = view.state().notes[0].clone();

    // Act
    let result = view.delete_note(&target).await;

    // Assert
    assert!(result.is_ok(), "Delete should succeed: {:?}", result);
    let state = view.state();
    assert!(state.notes.is_empty());
    assert!(state.errors.is_empty());
    Ok(())
}

#[tokio::test]
async fn given_name_with_slash_and_image_when_creating_and_deleting_then_object_round_trips(
) -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    let mut view = workspace.view(MockNoteDirectory::builder().build());
    let mut form =
        NoteForm::new("todo/home", "with image").with_image(Attachment::new("a.png", vec![1]));

    // Act
    view.create_note(&mut form).await?;

    // Assert
    assert!(workspace.object_exists("todo/home"));
    assert!(!workspace.bucket_dir.join("todo").exists());
    let target = view.state().notes[0].clone();
    let url = Url::parse(target.image.as_deref().expect("Image should resolve"))?;
    let path = url.to_file_path().expect("Image should be a file URL");
    assert_eq!(std::fs::read(path)?, vec![1]);

    view.delete_note(&target).await?;

    assert!(!workspace.object_exists("todo/home"));
    assert!(view.state().notes.is_empty());
    Ok(())
}
