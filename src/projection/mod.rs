pub mod mercator;
pub mod projector;

pub use mercator::WebMercatorProjector;
pub use projector::{Projector, ScreenPoint};
