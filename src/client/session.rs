//! Session token handling for the cookbook API.
//!
//! The backend hands out an opaque token on register/login; every subsequent
//! request carries it in the `X-Auth-Token` header. This module keeps the
//! token in memory and mirrors it into a pluggable [`TokenStore`], so the
//! in-memory value and the persisted value agree outside the synchronous
//! window of a set/clear call.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Mutex;

/// Leading characters of a token for log lines. Tokens are opaque strings,
/// so this counts characters rather than bytes.
pub(crate) fn token_preview(token: &str) -> String {
    token.chars().take(10).collect()
}

/// Persistence capability for the session token.
///
/// One logical key. [`Session`] reads through it once at construction and
/// writes through on every token change. Implement it over whatever the
/// target platform offers; [`MemoryTokenStore`] is the non-persistent
/// fallback and [`FileTokenStore`] the native single-file one.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Process-local token store. Nothing survives the process; useful for
/// environments without persistent storage and for tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Token store backed by a single file holding the raw token string.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory session token mirrored into a [`TokenStore`].
///
/// Construction eagerly loads the persisted token, so a client built over a
/// store that saw a previous login starts authenticated without any network
/// call. A store that fails to load degrades to an anonymous session.
pub struct Session {
    token: Option<String>,
    store: Box<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Box<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to load persisted session token: {}", e);
                None
            }
        };
        if token.is_some() {
            tracing::debug!("Restored session token from store");
        }
        Self { token, store }
    }

    /// Session with no persistence at all.
    pub fn ephemeral() -> Self {
        Self::new(Box::new(MemoryTokenStore::new()))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Replace the session token. `Some` persists the new value, `None`
    /// clears the persisted value as well.
    pub fn set_token(&mut self, token: Option<String>) -> Result<()> {
        match &token {
            Some(t) => {
                self.store.save(t)?;
                tracing::debug!("Session token updated: {}...", token_preview(t));
            }
            None => {
                self.store.clear()?;
                tracing::debug!("Session token cleared");
            }
        }
        self.token = token;
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}
