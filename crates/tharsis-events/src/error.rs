//! Error types for event-sourced reconstruction.

use tharsis_types::PlayerId;

/// A failure while folding events into a game state.
///
/// [`EventError::UnsupportedEvent`] is the one fatal class: the log is
/// corrupt or was written by a newer schema, and replay must hard-fail
/// rather than skip. The live game is unaffected; only this
/// reconstruction attempt dies.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The event type is not part of this schema's vocabulary.
    #[error("unsupported event type during replay: {kind}")]
    UnsupportedEvent {
        /// The unrecognized wire name.
        kind: String,
    },

    /// The event's payload does not deserialize into the shape its
    /// type demands.
    #[error("malformed {kind} payload: {source}")]
    MalformedPayload {
        /// The event type whose payload was malformed.
        kind: String,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// An event referenced a player the state does not contain.
    #[error("player not found in state: {0}")]
    PlayerNotFound(PlayerId),

    /// An event referenced an unknown milestone.
    #[error("milestone not found: {0}")]
    MilestoneNotFound(String),

    /// An event referenced an unknown award.
    #[error("award not found: {0}")]
    AwardNotFound(String),
}
