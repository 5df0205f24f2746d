//! Session store
//!
//! Holds the authenticated user's [`Session`] in memory and mirrors it to a
//! durable [`SessionSlot`]. The store is an ordinary value handed to the
//! commands that need it; there is no global session.
//!
//! # Module Layout
//!
//! - [`slot`] -- persistence backends (file, keyring, memory)

pub mod slot;

pub use slot::{FileSlot, KeyringSlot, MemorySlot, SessionSlot};

use crate::config::{SessionBackend, SessionConfig};
use crate::error::{Result, StudyshareError};
use crate::models::Session;

/// In-memory session plus the slot it is persisted to.
///
/// # Examples
///
/// ```
/// use studyshare::models::Session;
/// use studyshare::session::{MemorySlot, SessionStore};
///
/// let mut store = SessionStore::new(Box::new(MemorySlot::new()));
/// let session = Session {
///     id: "u1".to_string(),
///     display_name: "Asha".to_string(),
///     group: "CSE".to_string(),
///     year: "2nd".to_string(),
///     profile_pic_url: None,
///     token: "t1".to_string(),
/// };
///
/// store.save(session.clone()).unwrap();
/// assert_eq!(store.load(), Some(session));
///
/// store.clear().unwrap();
/// assert_eq!(store.load(), None);
/// ```
pub struct SessionStore {
    slot: Box<dyn SessionSlot>,
    current: Option<Session>,
}

impl SessionStore {
    /// Wrap a slot. Nothing is read until [`SessionStore::load`].
    pub fn new(slot: Box<dyn SessionSlot>) -> Self {
        Self {
            slot,
            current: None,
        }
    }

    /// Build the store described by the session configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the default file location cannot be determined.
    pub fn open(config: &SessionConfig) -> Result<Self> {
        let slot: Box<dyn SessionSlot> = match config.backend {
            SessionBackend::File => match &config.path {
                Some(path) => Box::new(FileSlot::new(path.clone())),
                None => Box::new(FileSlot::in_data_dir(&config.key)?),
            },
            SessionBackend::Keyring => Box::new(KeyringSlot::new(config.key.clone())),
        };
        tracing::debug!("Session slot: {}", slot.describe());
        Ok(Self::new(slot))
    }

    /// Read the persisted slot and refresh the in-memory session.
    ///
    /// A missing, unreadable, or malformed slot yields `None`; the latter
    /// two are logged at `warn` and otherwise ignored.
    pub fn load(&mut self) -> Option<Session> {
        self.current = match self.slot.read() {
            Ok(Some(blob)) => parse_blob(&blob, &self.slot.describe()),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Could not read session from {}: {}", self.slot.describe(), e);
                None
            }
        };
        self.current.clone()
    }

    /// Persist `session` and make it current.
    ///
    /// The in-memory session changes only after the slot write succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StudyshareError::InvalidSession`] for an empty token, or the
    /// slot's error if the write fails.
    pub fn save(&mut self, session: Session) -> Result<()> {
        session.validate()?;
        let blob = serde_json::to_string(&session).map_err(StudyshareError::Serialization)?;
        self.slot.write(&blob)?;
        tracing::info!("Saved session for user {}", session.id);
        self.current = Some(session);
        Ok(())
    }

    /// Remove the persisted session and forget the in-memory one.
    ///
    /// # Errors
    ///
    /// Returns the slot's error if removal fails; the in-memory session is
    /// kept in that case.
    pub fn clear(&mut self) -> Result<()> {
        self.slot.remove()?;
        if let Some(session) = self.current.take() {
            tracing::info!("Cleared session for user {}", session.id);
        }
        Ok(())
    }

    /// The in-memory session, without touching the slot.
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The in-memory session, or [`StudyshareError::NotLoggedIn`].
    ///
    /// `action` completes the sentence "Please log in to ...".
    pub fn require(&self, action: &str) -> Result<&Session> {
        self.current
            .as_ref()
            .ok_or_else(|| StudyshareError::NotLoggedIn(action.to_string()).into())
    }

    /// Where the session is persisted.
    pub fn location(&self) -> String {
        self.slot.describe()
    }
}

fn parse_blob(blob: &str, location: &str) -> Option<Session> {
    match serde_json::from_str::<Session>(blob) {
        Ok(session) if session.validate().is_ok() => Some(session),
        Ok(_) => {
            tracing::warn!("Ignoring session in {} with an empty token", location);
            None
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed session in {}: {}", location, e);
            None
        }
    }
}
