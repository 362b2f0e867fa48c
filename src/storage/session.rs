//! Local session store
//!
//! A single `session.json` blob read at startup, written at login and
//! removed at logout. Nothing is validated against a server.

use std::path::PathBuf;

use crate::error::CreatorFlowResult;
use crate::models::UserSession;

use super::file_io::{read_json, remove_if_exists, write_json_atomic};

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn read(&self) -> CreatorFlowResult<Option<UserSession>> {
        read_json(&self.path)
    }

    pub fn write(&self, session: &UserSession) -> CreatorFlowResult<()> {
        write_json_atomic(&self.path, session)
    }

    /// Returns whether a session was present
    pub fn clear(&self) -> CreatorFlowResult<bool> {
        remove_if_exists(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_read_clear() {
        let temp = TempDir::new().unwrap();
        let store = SessionStore::new(temp.path().join("session.json"));
        assert_eq!(store.read().unwrap(), None);

        let session = UserSession::new("ops@creatorflow.io");
        store.write(&session).unwrap();
        assert_eq!(store.read().unwrap(), Some(session));

        assert!(store.clear().unwrap());
        assert_eq!(store.read().unwrap(), None);
        assert!(!store.clear().unwrap());
    }
}
