//! Error types for cardsieve.
//!
//! Field absence is never an error here; it is an `Option` at the
//! extraction layer. Errors cover the external seams only.

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The settings provider could not supply or persist configuration.
    #[error("settings provider failed: {0}")]
    Settings(String),

    /// The health sink rejected or dropped a report.
    #[error("health sink failed: {0}")]
    Sink(String),

    /// The host context is gone; the engine must stop.
    #[error("host channel closed")]
    ChannelClosed,
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
