use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{draft::DrawId, error::DraftError};

pub const NEW_EDIT: &str = "new.edit";
pub const FINISH_EDIT: &str = "finish.edit";
pub const EDIT_END: &str = "edit.end";
/// Name of the event carrying a `RenderEvent`.
pub const FEATURE_UPDATE: &str = "edit.feature.update";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    NewEdit,
    FinishEdit,
    EditEnd,
}

impl SignalKind {
    pub const ALL: [SignalKind; 3] = [
        SignalKind::NewEdit,
        SignalKind::FinishEdit,
        SignalKind::EditEnd,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::NewEdit => NEW_EDIT,
            SignalKind::FinishEdit => FINISH_EDIT,
            SignalKind::EditEnd => EDIT_END,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        SignalKind::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Lifecycle signals the draft store reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// An edit session started or was re-initialised, re-broadcast the current drafts.
    NewEdit,
    /// The edit session is over, drop every draft.
    FinishEdit,
    /// Editing of one draft is over.
    EditEnd { draw_id: DrawId },
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::NewEdit => SignalKind::NewEdit,
            Signal::FinishEdit => SignalKind::FinishEdit,
            Signal::EditEnd { .. } => SignalKind::EditEnd,
        }
    }

    /// Parse a named event as fired by the map widget. Only `edit.end` reads its payload,
    /// which must carry the draft's id at `geometry.drawId`.
    pub fn from_event(name: &str, payload: &JsonValue) -> Result<Self, DraftError> {
        match SignalKind::from_name(name) {
            Some(SignalKind::NewEdit) => Ok(Signal::NewEdit),
            Some(SignalKind::FinishEdit) => Ok(Signal::FinishEdit),
            Some(SignalKind::EditEnd) => {
                let draw_id = payload
                    .pointer("/geometry/drawId")
                    .and_then(JsonValue::as_u64)
                    .ok_or_else(|| {
                        DraftError::InvalidSignal(format!(
                            "{} payload has no integer geometry.drawId: {}",
                            EDIT_END, payload
                        ))
                    })?;
                Ok(Signal::EditEnd { draw_id })
            }
            None => Err(DraftError::InvalidSignal(format!(
                "unknown signal {}",
                name
            ))),
        }
    }
}

/// Payload of `edit.feature.update`: the drafts followed by their vertex and midpoint
/// handles.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RenderEvent {
    pub geojson: geojson::FeatureCollection,
}

impl RenderEvent {
    pub fn name(&self) -> &'static str {
        FEATURE_UPDATE
    }
}
