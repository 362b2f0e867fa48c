//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Check whether user input refers to this ID
            ///
            /// Accepts the full UUID, the displayed short form (`prj-1a2b3c4d`)
            /// or any leading fragment of the UUID of at least four characters.
            pub fn matches(&self, input: &str) -> bool {
                let input = input.trim().to_lowercase();
                let input = input.strip_prefix($display_prefix).unwrap_or(&input);
                if input.len() < 4 {
                    return false;
                }
                self.0.to_string().starts_with(input)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(ProjectId, "prj-");
define_id!(ExpenseItemId, "exp-");
define_id!(DeliveryId, "dlv-");
define_id!(TaskId, "tsk-");
define_id!(InfluencerId, "inf-");
define_id!(TransactionId, "txn-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = ProjectId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("prj-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_matches_short_form() {
        let id = DeliveryId::new();
        assert!(id.matches(&id.to_string()));
        assert!(id.matches(&id.as_uuid().to_string()));
        assert!(id.matches(&id.as_uuid().to_string()[..6]));
        assert!(!id.matches("dlv-"));
        assert!(!id.matches("ab"));
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: TaskId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_id_serialization() {
        let id = InfluencerId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: InfluencerId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
