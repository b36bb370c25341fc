//! Error types for game construction and hosting
//!
//! The simulation itself never fails once built; everything here is a
//! precondition violation caught at startup or a host collaborator failure.

use crate::assets::SpriteKey;

/// Errors surfaced while building or hosting a game
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// A sprite required by the simulation was not supplied
    #[error("missing sprite for {0}")]
    MissingSprite(SpriteKey),

    /// A sprite was supplied with a zero-sized or fully transparent mask
    #[error("sprite for {0} has an empty collision mask")]
    EmptyMask(SpriteKey),

    /// Settings failed validation
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSettings { field: &'static str, reason: String },

    /// IO error while reading a settings file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed settings JSON
    #[error("settings parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The windowing/rendering collaborator reported a failure
    #[error("platform error: {0}")]
    Platform(String),
}

impl GameError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GameError::InvalidSettings {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
