//! Sign-in and sign-out
//!
//! There is no credential check: any non-empty email and password open a
//! session. The session gates the rest of the command surface.

use crate::audit::EntityType;
use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::UserSession;
use crate::storage::Storage;

pub struct SessionService<'a> {
    storage: &'a Storage,
}

impl<'a> SessionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn login(&self, email: &str, password: &str) -> CreatorFlowResult<UserSession> {
        if email.trim().is_empty() {
            return Err(CreatorFlowError::Validation("Email is required".into()));
        }
        if password.is_empty() {
            return Err(CreatorFlowError::Validation("Password is required".into()));
        }

        let session = UserSession::new(email);
        self.storage.session.write(&session)?;
        self.storage.log_create(
            EntityType::Session,
            session.email.clone(),
            Some(session.display_name.clone()),
            &session,
        )?;
        tracing::info!(user = %session.email, "Signed in");
        Ok(session)
    }

    /// Returns the session that was closed, if any
    pub fn logout(&self) -> CreatorFlowResult<Option<UserSession>> {
        let current = self.storage.session.read()?;
        if let Some(session) = &current {
            self.storage.session.clear()?;
            self.storage.log_delete(
                EntityType::Session,
                session.email.clone(),
                Some(session.display_name.clone()),
                session,
            )?;
            tracing::info!(user = %session.email, "Signed out");
        }
        Ok(current)
    }

    pub fn current(&self) -> CreatorFlowResult<Option<UserSession>> {
        self.storage.session.read()
    }

    /// The current session, or a session error when signed out
    pub fn require(&self) -> CreatorFlowResult<UserSession> {
        self.current()?.ok_or_else(|| {
            CreatorFlowError::Session("Not signed in. Run `creatorflow login` first".into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CreatorFlowPaths;
    use crate::config::settings::Settings;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_login_logout() {
        let (_temp, storage) = create_test_storage();
        let service = SessionService::new(&storage);
        assert!(matches!(service.require(), Err(CreatorFlowError::Session(_))));

        let session = service.login("ops@brand.co", "hunter2").unwrap();
        assert_eq!(session.display_name, "ops");
        assert_eq!(service.require().unwrap().email, "ops@brand.co");

        assert!(service.logout().unwrap().is_some());
        assert!(service.current().unwrap().is_none());
        assert!(service.logout().unwrap().is_none());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = SessionService::new(&storage);
        assert!(service.login("", "pw").unwrap_err().is_validation());
        assert!(service.login("a@b.c", "").unwrap_err().is_validation());
        assert!(service.current().unwrap().is_none());
    }
}
