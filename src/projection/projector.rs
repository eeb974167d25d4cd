use geo::Coord;

/// A position in the map widget's pixel space, origin at the top left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(&self, other: &ScreenPoint) -> ScreenPoint {
        ScreenPoint {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Converts between geographic coordinates (`x` = longitude, `y` = latitude, in degrees)
/// and screen pixels. `project` and `unproject` must be inverses of each other.
pub trait Projector {
    fn project(&self, lng_lat: Coord) -> ScreenPoint;
    fn unproject(&self, point: ScreenPoint) -> Coord;
}

impl<P: Projector + ?Sized> Projector for &P {
    fn project(&self, lng_lat: Coord) -> ScreenPoint {
        (**self).project(lng_lat)
    }

    fn unproject(&self, point: ScreenPoint) -> Coord {
        (**self).unproject(point)
    }
}

impl<P: Projector + ?Sized> Projector for Box<P> {
    fn project(&self, lng_lat: Coord) -> ScreenPoint {
        (**self).project(lng_lat)
    }

    fn unproject(&self, point: ScreenPoint) -> Coord {
        (**self).unproject(point)
    }
}
