/*!
Command handlers for the CLI

Each handler plays the part of one page of the web front-end: it checks the
session for gating, calls the API operations for its task, and on success
either replaces the stored session (auth and profile changes) or updates a
local list of uploads by id.

- `auth`     -- register, login, logout, whoami
- `profile`  -- profile setup and editing
- `uploads`  -- browsing, saving, and managing uploads
- `output`   -- table and detail rendering
*/

use colored::Colorize;

use crate::api::ApiClient;
use crate::cli::{Commands, ProfileCommand};
use crate::config::Config;
use crate::error::{Result, StudyshareError};
use crate::models::Session;
use crate::routes::Route;
use crate::session::SessionStore;

pub mod auth;
pub mod output;
pub mod profile;
pub mod uploads;

/// Everything a command needs, passed explicitly.
pub struct Context {
    pub api: ApiClient,
    pub store: SessionStore,
}

impl Context {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// Build the API client and open the session store, loading any
    /// persisted session.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;
        let mut store = SessionStore::open(&config.session)?;
        if let Some(session) = store.load() {
            tracing::debug!("Loaded session for user {}", session.id);
        }
        Ok(Self::new(api, store))
    }

    /// Current session, if any. Passed to every API call.
    pub fn session(&self) -> Option<&Session> {
        self.store.current()
    }

    /// Current session, or a "Please log in" error naming `action`.
    pub fn require_session(&self, action: &str) -> Result<&Session> {
        self.store.require(action)
    }
}

/// Run one parsed command.
pub async fn run(ctx: &mut Context, command: Commands) -> Result<()> {
    match command {
        Commands::Register {
            email,
            password,
            display_name,
            group,
            year,
        } => auth::register(ctx, email, password, display_name, group, year).await,
        Commands::Login { email, password } => auth::login(ctx, email, password).await,
        Commands::Logout => auth::logout(ctx),
        Commands::Whoami => auth::whoami(ctx),
        Commands::Profile { command } => match command {
            ProfileCommand::Setup {
                display_name,
                group,
                year,
                picture,
            } => profile::setup(ctx, display_name, group, year, picture).await,
            ProfileCommand::Edit {
                display_name,
                group,
                year,
                picture,
            } => profile::edit(ctx, display_name, group, year, picture).await,
        },
        Commands::List { search } => uploads::list(ctx, search.as_deref()).await,
        Commands::Show { id } => uploads::show(ctx, &id).await,
        Commands::Upload {
            file,
            subject,
            group,
            year,
            semester,
        } => uploads::create(ctx, file, subject, group, year, semester).await,
        Commands::Edit {
            id,
            subject,
            group,
            year,
            semester,
        } => uploads::edit(ctx, &id, subject, group, year, semester).await,
        Commands::Delete { id, yes } => uploads::delete(ctx, &id, yes).await,
        Commands::Download { id } => uploads::download(ctx, &id).await,
        Commands::Mine => uploads::mine(ctx).await,
        Commands::Saved => uploads::saved(ctx).await,
        Commands::Save { id } => uploads::save(ctx, &id).await,
        Commands::Unsave { id } => uploads::unsave(ctx, &id).await,
        Commands::Open { path } => open(ctx, &path).await,
    }
}

/// Run the command behind a front-end link.
async fn open(ctx: &mut Context, path: &str) -> Result<()> {
    let route = Route::parse(path).ok_or_else(|| {
        StudyshareError::InvalidInput(format!("no page matches '{}'", path))
    })?;
    tracing::debug!("Opening {} ({:?} layout)", route.path(), route.layout());

    match route {
        Route::Home => uploads::list(ctx, None).await,
        Route::Image(id) => uploads::show(ctx, &id).await,
        Route::Profile => {
            auth::whoami(ctx)?;
            uploads::mine(ctx).await
        }
        Route::Saved => uploads::saved(ctx).await,
        Route::Upload => {
            println!("Use {} to share a file.", "studyshare upload <FILE> --subject ...".cyan());
            Ok(())
        }
        Route::Login => {
            println!("Use {} to log in.", "studyshare login --email <EMAIL>".cyan());
            Ok(())
        }
        Route::ProfileSetup => {
            println!(
                "Use {} to complete your profile.",
                "studyshare profile setup --display-name <NAME> --group <GROUP>".cyan()
            );
            Ok(())
        }
    }
}

/// One-line message for the user; status-aware for backend errors.
pub fn user_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<StudyshareError>() {
        Some(e) if e.is_unauthorized() => {
            "Your session was rejected by the server. Please log in again.".to_string()
        }
        Some(StudyshareError::Api { status: 404, .. }) => {
            "That item no longer exists.".to_string()
        }
        Some(StudyshareError::Api { status, message }) if *status >= 500 => {
            format!("The server failed to handle the request ({}). Please try again.", message)
        }
        Some(StudyshareError::Transport(_)) => {
            "Could not reach the Studyshare server. Please try again.".to_string()
        }
        _ => format!("{:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_unauthorized() {
        let err: anyhow::Error = StudyshareError::Api {
            status: 401,
            message: "jwt expired".to_string(),
        }
        .into();
        assert!(user_message(&err).contains("log in again"));
    }

    #[test]
    fn test_user_message_for_refused_login_keeps_server_text() {
        let err: anyhow::Error = StudyshareError::CredentialsRejected {
            status: 401,
            message: "Invalid email or password".to_string(),
        }
        .into();
        assert_eq!(user_message(&err), "Invalid email or password");
    }

    #[test]
    fn test_user_message_for_validation_error_keeps_server_text() {
        let err: anyhow::Error = StudyshareError::Api {
            status: 400,
            message: "Subject is required".to_string(),
        }
        .into();
        assert!(user_message(&err).contains("Subject is required"));
    }

    #[test]
    fn test_user_message_for_server_error() {
        let err: anyhow::Error = StudyshareError::Api {
            status: 503,
            message: "maintenance".to_string(),
        }
        .into();
        let msg = user_message(&err);
        assert!(msg.contains("maintenance"));
        assert!(msg.contains("try again"));
    }

    #[test]
    fn test_user_message_for_not_logged_in() {
        let err: anyhow::Error = StudyshareError::NotLoggedIn("see saved uploads".into()).into();
        assert_eq!(user_message(&err), "Please log in to see saved uploads");
    }

    #[test]
    fn test_user_message_for_transport() {
        let err: anyhow::Error = StudyshareError::Transport("refused".into()).into();
        assert!(user_message(&err).contains("Could not reach"));
    }
}
