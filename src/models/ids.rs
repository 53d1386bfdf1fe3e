//! Strongly-typed ID wrappers for all entity types
//!
//! Ids are random UUIDs assigned when a record is created, so two records can
//! never share an id even after deletions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of the hex part shown in the short display form
const SHORT_LEN: usize = 8;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short hex form without the prefix
            pub fn short(&self) -> String {
                self.0.simple().to_string()[..SHORT_LEN].to_string()
            }

            /// Check whether user input refers to this id
            ///
            /// Accepts the full UUID, the short display form ("txn-1a2b3c4d"),
            /// or the short form without its prefix.
            pub fn matches(&self, input: &str) -> bool {
                let input = input.trim().to_ascii_lowercase();
                if let Ok(uuid) = Uuid::parse_str(&input) {
                    return uuid == self.0;
                }
                let input = input.strip_prefix($display_prefix).unwrap_or(&input);
                input.len() == SHORT_LEN && input == self.short()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.short())
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
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(BudgetId, "bud-");
define_id!(GoalId, "goal-");
define_id!(ContributionId, "ctb-");
