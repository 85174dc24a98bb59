//! Client-side persistence of the logged-in user.
//!
//! The remote profile service is the source of truth; what lives here is the
//! session cache the view works from between reconciliations. Exactly one
//! serialized `User` record is kept, read at session start and rewritten after
//! every successful profile reconciliation.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::debug;
use shared::User;
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

/// File name the session record is stored under.
const SESSION_FILE: &str = "user_session.json";

/// Storage abstraction for the cached session user.
///
/// Lets the workflow run against the JSON file store on desktop, browser
/// storage in a wasm frontend, or an in-memory double in tests without
/// modification.
pub trait SessionStore {
    /// Read the cached user, if a session has been persisted.
    fn load_user(&self) -> Result<Option<User>>;

    /// Persist the given user as the current session.
    fn save_user(&self, user: &User) -> Result<()>;

    /// Drop the persisted session.
    fn clear(&self) -> Result<()>;
}

/// Session store backed by a single JSON file in a data directory.
pub struct FileSessionStore {
    base_directory: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at the given directory, creating it if needed.
    pub fn new(base_directory: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_directory)
            .with_context(|| format!("failed to create data directory {:?}", base_directory))?;
        Ok(Self { base_directory })
    }

    /// Platform-appropriate default data directory for the app.
    pub fn default_directory() -> Option<PathBuf> {
        ProjectDirs::from("", "", "income-ledger").map(|dirs| dirs.data_dir().to_path_buf())
    }

    fn session_path(&self) -> PathBuf {
        self.base_directory.join(SESSION_FILE)
    }
}

impl SessionStore for FileSessionStore {
    fn load_user(&self) -> Result<Option<User>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read session file {:?}", path))?;
        let user = serde_json::from_str(&contents)
            .with_context(|| format!("session file {:?} is not a valid user record", path))?;
        Ok(Some(user))
    }

    fn save_user(&self, user: &User) -> Result<()> {
        let path = self.session_path();
        let contents =
            serde_json::to_string_pretty(user).context("failed to serialize session user")?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write session file {:?}", path))?;
        debug!("persisted session user to {:?}", path);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove session file {:?}", path))?;
        }
        Ok(())
    }
}

/// In-memory session store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    user: RefCell<Option<User>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a user already persisted.
    pub fn with_user(user: User) -> Self {
        Self {
            user: RefCell::new(Some(user)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load_user(&self) -> Result<Option<User>> {
        Ok(self.user.borrow().clone())
    }

    fn save_user(&self, user: &User) -> Result<()> {
        *self.user.borrow_mut() = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.user.borrow_mut() = None;
        Ok(())
    }
}
