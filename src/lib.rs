//! Transient store for map features that are being drawn or edited.
//!
//! The store tracks the drafts under edit, derives vertex and midpoint handles for them
//! and publishes drafts plus handles as one GeoJSON FeatureCollection after every change.
extern crate log;

pub mod config;
pub mod draft;
pub mod error;
pub mod events;
pub mod geofile;
pub mod handles;
pub mod projection;
pub mod store;

pub use config::{DuplicatePolicy, StoreConfig};
pub use draft::{Draft, DraftFeature, DraftKind, DrawId};
pub use error::DraftError;
pub use events::{EventBus, LocalBus, RenderEvent, Signal};
pub use projection::{Projector, ScreenPoint, WebMercatorProjector};
pub use store::DraftStore;
