//! Bearer-token session shared by the transport and the dashboard.

use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
    store: Option<PathBuf>,
}

impl Session {
    /// A session that sends no `Authorization` header and persists nothing.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
            store: None,
        }
    }

    /// Restores a persisted token. A missing or blank file yields an
    /// anonymous session bound to the same path.
    pub fn restore(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let token = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        if token.is_some() {
            log::info!("Restored session from {}", path.display());
        }

        Ok(Self {
            token: RwLock::new(token),
            store: Some(path),
        })
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Replaces the token and writes it to the store, if any.
    pub fn login(&self, token: impl Into<String>) -> io::Result<()> {
        let token = token.into();
        if let Some(path) = &self.store {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &token)?;
        }
        *self.token.write() = Some(token);
        Ok(())
    }

    /// Forgets the token and removes the persisted copy.
    pub fn logout(&self) -> io::Result<()> {
        *self.token.write() = None;
        if let Some(path) = &self.store {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
