//! Command-line interface definition for Studyshare
//!
//! This module defines the CLI structure using clap's derive API. Each
//! subcommand corresponds to one page of the web front-end.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::Year;

/// Studyshare - share and find course materials from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "studyshare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the backend base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Store the session in this file instead of the configured slot
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Studyshare
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STUDYSHARE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        display_name: String,
        #[arg(long)]
        group: String,
        #[arg(long, value_enum, default_value_t = Year::First)]
        year: Year,
    },

    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STUDYSHARE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Set up or edit your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// List uploads, optionally filtered by a search term
    List {
        /// Case-insensitive match on subject, group, year, or semester
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one upload
    Show { id: String },

    /// Share a new file
    Upload {
        /// File to upload
        file: PathBuf,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        group: String,
        #[arg(long, value_enum, default_value_t = Year::First)]
        year: Year,
        #[arg(long)]
        semester: String,
    },

    /// Edit the details of one of your uploads
    Edit {
        id: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long, value_enum)]
        year: Option<Year>,
        #[arg(long)]
        semester: Option<String>,
    },

    /// Permanently delete one of your uploads
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Record a download and print the file link
    Download { id: String },

    /// List your uploads
    Mine,

    /// List uploads you saved
    Saved,

    /// Save an upload to your list
    Save { id: String },

    /// Remove an upload from your saved list
    Unsave { id: String },

    /// Open a front-end link, e.g. `/image/<id>` or `/saved`
    Open { path: String },
}

/// Profile subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    /// Complete your profile after registering
    Setup {
        #[arg(long)]
        display_name: String,
        #[arg(long)]
        group: String,
        #[arg(long, value_enum, default_value_t = Year::First)]
        year: Year,
        /// Profile picture to upload
        #[arg(long)]
        picture: Option<PathBuf>,
    },

    /// Change fields of your profile; unspecified fields keep their value
    Edit {
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long, value_enum)]
        year: Option<Year>,
        #[arg(long)]
        picture: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            api_url: None,
            session_file: None,
            verbose: false,
            command: Commands::Whoami,
        }
    }
}
