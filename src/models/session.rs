//! Signed-in user identity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The local session blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub email: String,
    pub display_name: String,
    pub signed_in_at: DateTime<Utc>,
}

impl UserSession {
    /// Start a session; the display name is the local part of the email
    pub fn new(email: &str) -> Self {
        let email = email.trim().to_string();
        let display_name = email
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or(&email)
            .to_string();
        Self {
            email,
            display_name,
            signed_in_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_from_email() {
        let session = UserSession::new(" admin@creatorflow.io ");
        assert_eq!(session.email, "admin@creatorflow.io");
        assert_eq!(session.display_name, "admin");
    }

    #[test]
    fn test_display_name_without_at() {
        assert_eq!(UserSession::new("operator").display_name, "operator");
        assert_eq!(UserSession::new("@host").display_name, "@host");
    }
}
