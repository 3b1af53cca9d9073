//! Type-safe identifier wrappers.
//!
//! Games, players, and events carry strongly-typed UUID identifiers to
//! prevent accidental mixing at compile time, generated as UUID v7
//! (time-ordered). Cards are the exception: card definitions carry
//! human-authored string IDs (e.g. `"arctic-algae"`), so [`CardId`] wraps
//! a string instead.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a game.
    GameId
}

define_id! {
    /// Unique identifier for a player within a game.
    PlayerId
}

define_id! {
    /// Unique identifier for an event in a game's event log.
    EventId
}

/// Identifier of a card definition.
///
/// Card IDs come from the card-definition JSON and are human-authored
/// strings, not UUIDs. The newtype keeps them from being confused with
/// player or game identifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct CardId(pub String);

impl CardId {
    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CardId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let game = GameId::new();
        let player = PlayerId::new();
        // These are different types -- the compiler enforces no mixing.
        assert_ne!(game.into_inner(), Uuid::nil());
        assert_ne!(player.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = PlayerId::new();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<PlayerId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert!(restored.is_ok());
    }

    #[test]
    fn card_id_is_transparent_in_json() {
        let id = CardId::from("arctic-algae");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"arctic-algae\""));
    }

    #[test]
    fn card_id_display_matches_inner() {
        let id = CardId::from("mining-rights");
        assert_eq!(id.to_string(), "mining-rights");
        assert_eq!(id.as_str(), "mining-rights");
    }
}
