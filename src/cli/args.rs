// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List notes
    List {
        /// Output notes as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,

        /// Open the notes page in the browser
        #[arg(long)]
        html: bool,
    },

    /// Create a note, optionally with an image
    Create {
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(value_name = "DESCRIPTION")]
        description: String,

        /// Image file to attach; stored under the note name
        #[arg(short, long, value_name = "IMAGE")]
        image: Option<PathBuf>,
    },

    /// Delete a note and its image
    Delete {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Show the signed-in user
    Whoami,

    /// Sign out by removing the cached session
    Logout,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
