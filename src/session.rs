use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;

use crate::models::Identity;

const SESSION_FILE: &str = "session.json";

/// Persisted login state: one JSON file holding the current identity, read at
/// startup and rewritten or removed on every login, register and logout.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open_default() -> Self {
        let dir = if let Some(home) = dirs::home_dir() {
            home.join(".torrid")
        } else {
            PathBuf::from(".torrid")
        };
        Self {
            path: dir.join(SESSION_FILE),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the persisted identity, if any. A missing file is simply a
    /// logged-out session; an unreadable one is treated the same way.
    pub fn load(&self) -> Option<Identity> {
        let data = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&data) {
            Ok(identity) => Some(identity),
            Err(err) => {
                warn!(
                    "ignoring unreadable session file {}: {err}",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Writes the identity, or removes the file when passed `None`.
    pub fn save(&self, identity: Option<&Identity>) -> Result<()> {
        match identity {
            Some(identity) => {
                if let Some(parent) = self.path.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                let data =
                    serde_json::to_string(identity).context("failed to serialize session")?;
                fs::write(&self.path, data)
                    .with_context(|| format!("failed to write {}", self.path.display()))?;
            }
            None => {
                if self.path.exists() {
                    fs::remove_file(&self.path)
                        .with_context(|| format!("failed to remove {}", self.path.display()))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn temp_store(name: &str) -> SessionStore {
        let path = std::env::temp_dir().join(format!(
            "torrid-session-{}-{name}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        SessionStore::at(path)
    }

    fn identity() -> Identity {
        Identity {
            id: "u1".into(),
            username: "alice".into(),
            role: "user".into(),
        }
    }

    #[test]
    fn roundtrip_survives_a_simulated_restart() {
        let store = temp_store("roundtrip");
        assert_eq!(store.load(), None);
        store.save(Some(&identity())).unwrap();

        // A fresh store over the same path stands in for a restart.
        let reopened = SessionStore::at(store.path.clone());
        assert_eq!(reopened.load(), Some(identity()));
        store.save(None).unwrap();
    }

    #[test]
    fn clearing_removes_the_file() {
        let store = temp_store("clear");
        store.save(Some(&identity())).unwrap();
        store.save(None).unwrap();
        assert!(!store.path.exists());
        assert_eq!(store.load(), None);
        // Clearing an already-empty session is a no-op.
        store.save(None).unwrap();
    }

    #[test]
    fn garbage_file_reads_as_logged_out() {
        let store = temp_store("garbage");
        fs::write(&store.path, "not json").unwrap();
        assert_eq!(store.load(), None);
        store.save(None).unwrap();
    }
}
