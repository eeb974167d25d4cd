use crate::{
    draft::{DraftFeature, HandleRing},
    error::DraftError,
};

use super::{with_handle_ring, Handle};

/// One vertex handle per distinct position of the ring, indexed from zero.
pub fn ring_vertices(ring: HandleRing<'_>) -> impl Iterator<Item = Handle> + '_ {
    ring.positions
        .iter()
        .take(ring.vertex_count())
        .enumerate()
        .map(|(index, position)| Handle::vertex(index, position.clone()))
}

/// Vertex handles of all drafts, in draft order. Fails on the first draft whose
/// geometry cannot be read.
pub fn vertices<D: DraftFeature>(drafts: &[D]) -> Result<Vec<Handle>, DraftError> {
    let mut handles = Vec::new();
    for draft in drafts {
        let ring_handles =
            with_handle_ring(draft, |ring| ring_vertices(ring).collect::<Vec<_>>())?;
        handles.extend(ring_handles.unwrap_or_default());
    }
    Ok(handles)
}
