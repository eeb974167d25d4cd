pub mod midpoint;
pub mod vertex;

use geo::Coord;
use serde_json::Value as JsonValue;

use crate::{
    draft::{DraftFeature, EditGeometry, EditPosition, HandleRing},
    error::DraftError,
    projection::Projector,
};

pub use midpoint::{midpoints, ring_midpoints};
pub use vertex::{ring_vertices, vertices};

/// Property names of a rendered handle.
pub const META_PROPERTY: &str = "meta";
pub const INDEX_PROPERTY: &str = "index";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleMeta {
    Vertex,
    Midpoint,
}

impl HandleMeta {
    pub fn name(&self) -> &'static str {
        match self {
            HandleMeta::Vertex => "vertex",
            HandleMeta::Midpoint => "midpoint",
        }
    }
}

/// A point the user can drag to edit a draft. Handles only live for one render pass.
///
/// Vertex handles are indexed by their position in the ring and carry the ring position
/// unchanged, altitude included. Midpoint handles are indexed by the one-based gap they sit
/// in, so midpoint `i` lies between vertices `i - 1` and `i`, and are always planar.
#[derive(Clone, Debug, PartialEq)]
pub struct Handle {
    pub meta: HandleMeta,
    pub index: usize,
    pub position: EditPosition,
}

impl Handle {
    pub fn vertex(index: usize, position: EditPosition) -> Self {
        Self {
            meta: HandleMeta::Vertex,
            index,
            position,
        }
    }

    pub fn midpoint(index: usize, coord: Coord) -> Self {
        Self {
            meta: HandleMeta::Midpoint,
            index,
            position: coord.into(),
        }
    }

    pub fn coord(&self) -> Coord {
        self.position.coord
    }
}

impl From<&Handle> for geojson::Feature {
    fn from(handle: &Handle) -> Self {
        let mut properties = geojson::JsonObject::new();
        properties.insert(
            META_PROPERTY.to_string(),
            JsonValue::from(handle.meta.name()),
        );
        properties.insert(INDEX_PROPERTY.to_string(), JsonValue::from(handle.index));
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(
                handle.position.to_geojson(),
            ))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Handles of all drafts, vertices and midpoints kept apart so they can be rendered in
/// that order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DraftHandles {
    pub vertices: Vec<Handle>,
    pub midpoints: Vec<Handle>,
}

impl DraftHandles {
    pub fn features(&self) -> impl Iterator<Item = geojson::Feature> + '_ {
        self.vertices
            .iter()
            .chain(self.midpoints.iter())
            .map(geojson::Feature::from)
    }
}

/// Read the geometry of a draft and apply `f` to its handle ring. `None` when the
/// geometry has no ring, e.g. a point.
pub(crate) fn with_handle_ring<D, T, F>(draft: &D, f: F) -> Result<Option<T>, DraftError>
where
    D: DraftFeature,
    F: FnOnce(HandleRing<'_>) -> T,
{
    let geometry = EditGeometry::from_feature(draft.draw_id(), &draft.to_geojson())?;
    Ok(geometry.handle_ring().map(f))
}

/// Derive the handles of every draft. A draft whose geometry cannot be read gets no
/// handles; the others are unaffected.
pub fn derive_handles<D: DraftFeature, P: Projector>(drafts: &[D], projector: &P) -> DraftHandles {
    let mut handles = DraftHandles::default();
    for draft in drafts {
        let derived = with_handle_ring(draft, |ring| {
            let vertices: Vec<Handle> = ring_vertices(ring).collect();
            let midpoints = if draft.kind().allows_midpoints() {
                ring_midpoints(ring, projector)
            } else {
                Vec::new()
            };
            (vertices, midpoints)
        });
        match derived {
            Ok(Some((vertices, midpoints))) => {
                handles.vertices.extend(vertices);
                handles.midpoints.extend(midpoints);
            }
            Ok(None) => {}
            Err(err) => log::warn!("Skipping handles, {}", err),
        }
    }
    handles
}
