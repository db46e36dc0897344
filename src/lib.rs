// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use application::{NotesState, NotesView};
use cli::args::{Args, Command};
use domain::{Attachment, DomainError, NoteForm, NoteId};
use infrastructure::{
    AnyObjectStore, Config, FsObjectStore, GraphQlNoteDirectory, HttpObjectStore, PageRenderer,
    SessionFileIdentity, StorageBackend,
};
use ports::{HtmlPresenter, TextPresenter};
use std::path::Path;
use tracing::{debug, info};

pub type CliNotesView = NotesView<SessionFileIdentity, AnyObjectStore, GraphQlNoteDirectory>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notesview with arguments");

    let config_path = match args.config {
        Some(path) => path,
        None => Config::default_path().context("Could not determine config directory")?,
    };

    match args.command {
        Command::Init { force } => init_config(&config_path, force)?,
        Command::List { json, html } => {
            let mut view = load_view(&config_path)?;
            view.initialize().await.context("Failed to load notes")?;
            let format = match (json, html) {
                (true, _) => OutputFormat::Json,
                (_, true) => OutputFormat::Html,
                _ => OutputFormat::Text,
            };
            present(&view.state(), format)?;
        }
        Command::Create {
            name,
            description,
            image,
        } => {
            let mut form = NoteForm::new(name, description);
            if let Some(path) = image {
                let attachment = Attachment::from_path(&path)
                    .await
                    .with_context(|| format!("Failed to read image {}", path.display()))?;
                form = form.with_image(attachment);
            }
            let mut view = load_view(&config_path)?;
            view.initialize().await.context("Failed to load notes")?;
            let created = view
                .create_note(&mut form)
                .await
                .context("Failed to create note")?;
            info!(note_id = %created.id, "Note created");
            present(&view.state(), OutputFormat::Text)?;
        }
        Command::Delete { note_id } => {
            let mut view = load_view(&config_path)?;
            view.initialize().await.context("Failed to load notes")?;
            let id = NoteId(note_id);
            let note = view
                .state()
                .find(&id)
                .cloned()
                .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))?;
            let result = view.delete_note(&note).await;
            present(&view.state(), OutputFormat::Text)?;
            result.context("Failed to delete note")?;
        }
        Command::Whoami => {
            let view = load_view(&config_path)?;
            let identity = view.current_user().await?;
            println!("username: {}", identity.username);
            println!("userId: {}", identity.user_id);
            if let Some(details) = identity.sign_in_details {
                if let Some(login_id) = details.login_id {
                    println!("loginId: {}", login_id);
                }
                if let Some(flow) = details.auth_flow_type {
                    println!("authFlowType: {}", flow);
                }
            }
        }
        Command::Logout => {
            let mut view = load_view(&config_path)?;
            view.sign_out().await.context("Failed to sign out")?;
            println!("Signed out");
        }
    }

    Ok(())
}

fn load_view(config_path: &Path) -> Result<CliNotesView> {
    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    build_view(&config)
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))
}

/// Wire the view to the services named in the config
pub fn build_view(config: &Config) -> Result<CliNotesView> {
    if config.api.endpoint.is_empty() {
        bail!("No API endpoint configured; set `endpoint` in the [api] section");
    }
    let directory = GraphQlNoteDirectory::new(&config.api.endpoint)?
        .with_api_key(config.api.api_key.clone())
        .with_auth_token(config.api.auth_token.clone());

    let store = match config.storage.backend {
        StorageBackend::Http => {
            if config.storage.base_url.is_empty() {
                bail!("No storage base_url configured; set `base_url` in the [storage] section");
            }
            AnyObjectStore::Http(
                HttpObjectStore::new(&config.storage.base_url, &config.storage.prefix)?
                    .with_auth_token(config.api.auth_token.clone()),
            )
        }
        StorageBackend::Fs => AnyObjectStore::Fs(FsObjectStore::new(&config.storage.root)),
    };

    let identity = SessionFileIdentity::new(&config.auth.session_file);
    Ok(NotesView::new(identity, store, directory))
}

pub fn present(state: &NotesState, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", TextPresenter::new().render(state)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&state.notes)
                .context("Failed to serialize notes")?;
            println!("{}", json);
        }
        OutputFormat::Html => {
            let html = HtmlPresenter::new().render(state);
            let mut renderer = PageRenderer::new();
            let path = renderer.write_page(&html)?;
            renderer.open_in_browser(&path)?;
        }
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    Config::create_default(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
