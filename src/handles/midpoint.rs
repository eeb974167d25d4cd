use crate::{
    draft::{DraftFeature, HandleRing},
    error::DraftError,
    projection::Projector,
};

use super::{with_handle_ring, Handle};

/// One midpoint handle per pair of consecutive ring positions.
///
/// The midpoint is taken on screen rather than in degrees: both ends are projected, their
/// pixel positions averaged and the result unprojected, so the handle sits where the user
/// sees the middle of the segment.
pub fn ring_midpoints<P: Projector + ?Sized>(ring: HandleRing<'_>, projector: &P) -> Vec<Handle> {
    ring.positions
        .windows(2)
        .enumerate()
        .map(|(index, segment)| {
            let start = projector.project(segment[0].coord);
            let end = projector.project(segment[1].coord);
            Handle::midpoint(index + 1, projector.unproject(start.midpoint(&end)))
        })
        .collect()
}

/// Midpoint handles of all drafts except squares, in draft order. Fails on the first
/// draft whose geometry cannot be read.
pub fn midpoints<D: DraftFeature, P: Projector + ?Sized>(
    drafts: &[D],
    projector: &P,
) -> Result<Vec<Handle>, DraftError> {
    let mut handles = Vec::new();
    for draft in drafts.iter().filter(|draft| draft.kind().allows_midpoints()) {
        let ring_handles = with_handle_ring(draft, |ring| ring_midpoints(ring, projector))?;
        handles.extend(ring_handles.unwrap_or_default());
    }
    Ok(handles)
}
