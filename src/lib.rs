//! Studyshare - client library and CLI for the Studyshare course material service
//!
//! Students browse, upload, save, and manage shared course files through a
//! remote backend. This crate holds the client side: the session store, the
//! REST client that attaches the session's bearer token, and the command
//! handlers built on them.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: session store over a durable slot (file, keyring, memory)
//! - `api`: REST client; one request builder applies the credential policy
//! - `models`: wire types (session, uploads, forms)
//! - `collection`: apply server results to a local list by id
//! - `profile`: transient profile drafts
//! - `routes`: front-end path to page table
//! - `commands`: CLI command handlers
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use studyshare::{ApiClient, Config, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let api = ApiClient::new(&config.api)?;
//!     let mut store = SessionStore::open(&config.session)?;
//!     let session = store.load();
//!
//!     for upload in api.list_uploads(session.as_ref()).await? {
//!         println!("{} {}", upload.id, upload.subject);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod collection;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod profile;
pub mod routes;
pub mod session;

// Re-export commonly used types
pub use api::{auth_headers, ApiClient};
pub use config::Config;
pub use error::{Result, StudyshareError};
pub use models::{Session, Upload, UploadEdit};
pub use session::SessionStore;
