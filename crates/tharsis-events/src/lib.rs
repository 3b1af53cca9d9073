//! Event-sourced game state reconstruction.
//!
//! Every state change in a game can be recorded as an immutable
//! [`GameEvent`]; replaying the ordered log from an empty canonical
//! state reproduces the live state exactly. The [`GameAggregate`] owns
//! a log and its folded state, supports appending new events, and can
//! reconstruct the state as of any version for debugging or dispute
//! resolution.
//!
//! Replay is deterministic: the same log always folds to the same
//! state, independent of when it is replayed.

pub mod aggregate;
pub mod error;
pub mod event;
pub mod state;

pub use aggregate::{apply_event_to_state, GameAggregate};
pub use error::EventError;
pub use event::{EventMetadata, GameEvent, GameEventType};
pub use state::{Award, GameState, Milestone, PlacedTile, PlayerSnapshot};
