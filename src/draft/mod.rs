pub mod feature;
pub mod geo_draft;
pub mod geometry;

pub use feature::{DraftFeature, DraftKind, DrawId};
pub use geo_draft::Draft;
pub use geometry::{EditGeometry, EditPosition, HandleRing};
