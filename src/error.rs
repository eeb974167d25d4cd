use thiserror::Error;

use crate::draft::DrawId;

/// Errors raised by the draft store and its collaborators.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("Malformed geometry on draft {draw_id}: {reason}")]
    MalformedGeometry { draw_id: DrawId, reason: String },

    #[error("A draft with drawId {0} is already being edited")]
    DuplicateDrawId(DrawId),

    #[error("Feature has no usable drawId property")]
    MissingDrawId,

    #[error("Unknown draft kind {0}")]
    UnknownKind(String),

    #[error("Cannot edit geometry of type {0}")]
    UnsupportedGeometry(String),

    #[error("Invalid signal: {0}")]
    InvalidSignal(String),
}
