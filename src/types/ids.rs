//! Newtype wrappers for Notion identifiers.
//!
//! Every identifier in a webhook payload is an opaque string. Wrapping them keeps
//! a workspace id from being passed where a data source id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a transparent string newtype with the usual constructors.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                $name(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }
    };
}

string_id! {
    /// Sender-assigned event id.
    ///
    /// Not unique across retries: the sender reuses it when it redelivers.
    EventId
}

string_id! {
    /// The workspace an event originated from.
    WorkspaceId
}

string_id! {
    /// The id of the object the event is about (`data.id`).
    ObjectId
}

string_id! {
    /// A data source id, introduced by the multi-source database schema.
    DataSourceId
}
