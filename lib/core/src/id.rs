//! Strongly-typed ID types for domain entities.
//!
//! Chat-platform identifiers (users, chats) are 64-bit integers assigned by
//! the platform; directory identifiers (stations, workers) are 32-bit serials
//! assigned by the database. The wrappers keep the two families from being
//! mixed up in function signatures and callback payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to generate a strongly-typed ID wrapper around a platform integer.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $raw:ty) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name($raw);

        impl $name {
            /// Creates an ID from a raw platform value.
            #[must_use]
            pub const fn new(raw: $raw) -> Self {
                Self(raw)
            }

            /// Returns the underlying raw value.
            #[must_use]
            pub const fn get(self) -> $raw {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<$raw>().map(Self).map_err(|e| ParseIdError {
                    id_type: stringify!($name),
                    reason: e.to_string(),
                })
            }
        }

        impl From<$raw> for $name {
            fn from(raw: $raw) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for $raw {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier the chat platform assigns to a user account.
    ChatUserId,
    i64
);

define_id!(
    /// Unique identifier the chat platform assigns to a chat.
    ///
    /// Group chats carry negative values; private chats share the numeric
    /// value of the user they belong to.
    ChatId,
    i64
);

define_id!(
    /// Unique identifier for a metro station.
    StationId,
    i32
);

define_id!(
    /// Unique identifier for a station worker record.
    WorkerId,
    i32
);

impl From<ChatUserId> for ChatId {
    fn from(user: ChatUserId) -> Self {
        Self(user.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_number() {
        let id = StationId::new(17);
        assert_eq!(id.to_string(), "17");
    }

    #[test]
    fn parse_roundtrip() {
        let id = WorkerId::new(204);
        let parsed: WorkerId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_negative_chat_id() {
        let parsed: ChatId = "-1001234567890".parse().expect("should parse");
        assert_eq!(parsed.get(), -1_001_234_567_890);
    }

    #[test]
    fn parse_invalid_number() {
        let result: Result<StationId, _> = "abc".parse();
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.id_type, "StationId");
    }

    #[test]
    fn id_equality() {
        let id1 = ChatUserId::new(998877);
        let id2 = ChatUserId::new(998877);
        assert_eq!(id1, id2);
    }

    #[test]
    fn id_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ChatUserId::new(1));
        set.insert(ChatUserId::new(2));
        set.insert(ChatUserId::new(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn private_chat_shares_user_number() {
        let user = ChatUserId::new(424242);
        let chat = ChatId::from(user);
        assert_eq!(chat.get(), 424242);
    }

    #[test]
    fn serde_is_transparent() {
        let id = WorkerId::new(9);
        let json = serde_json::to_string(&id).expect("should serialize");
        assert_eq!(json, "9");
        let back: WorkerId = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, id);
    }
}
