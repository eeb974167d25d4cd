use std::f64::consts::PI;

use geo::Coord;
use serde::Deserialize;

use super::{Projector, ScreenPoint};

/// Latitude at which the Web Mercator world becomes square.
pub const MAX_LATITUDE: f64 = 85.051129;

fn default_tile_size() -> f64 {
    512.0
}

/// What the map widget currently shows.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Viewport {
    /// Longitude and latitude at the center of the screen.
    pub center: [f64; 2],
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_tile_size")]
    pub tile_size: f64,
}

impl Viewport {
    pub fn new(center: Coord, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            center: [center.x, center.y],
            zoom,
            width,
            height,
            tile_size: default_tile_size(),
        }
    }
}

/// Web Mercator projection of a viewport, as used by tiled slippy maps.
#[derive(Clone, Debug, PartialEq)]
pub struct WebMercatorProjector {
    viewport: Viewport,
}

impl WebMercatorProjector {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_center(&mut self, center: Coord) {
        self.viewport.center = [center.x, center.y];
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.zoom = zoom;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    fn world_size(&self) -> f64 {
        self.viewport.tile_size * 2f64.powf(self.viewport.zoom)
    }

    /// Pixel position in the whole world at the current zoom.
    fn lng_lat_to_world(&self, lng_lat: Coord) -> (f64, f64) {
        let lat = lng_lat.y.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let world_size = self.world_size();
        let x = (180.0 + lng_lat.x) / 360.0 * world_size;
        let y = (180.0 - (180.0 / PI) * (PI / 4.0 + lat * PI / 360.0).tan().ln()) / 360.0
            * world_size;
        (x, y)
    }

    fn world_to_lng_lat(&self, x: f64, y: f64) -> Coord {
        let world_size = self.world_size();
        let lng = x * 360.0 / world_size - 180.0;
        let y2 = 180.0 - y * 360.0 / world_size;
        let lat = 360.0 / PI * (y2 * PI / 180.0).exp().atan() - 90.0;
        Coord { x: lng, y: lat }
    }

    fn center_in_world(&self) -> (f64, f64) {
        self.lng_lat_to_world(Coord {
            x: self.viewport.center[0],
            y: self.viewport.center[1],
        })
    }
}

impl Projector for WebMercatorProjector {
    fn project(&self, lng_lat: Coord) -> ScreenPoint {
        let (x, y) = self.lng_lat_to_world(lng_lat);
        let (center_x, center_y) = self.center_in_world();
        ScreenPoint {
            x: x - center_x + self.viewport.width / 2.0,
            y: y - center_y + self.viewport.height / 2.0,
        }
    }

    fn unproject(&self, point: ScreenPoint) -> Coord {
        let (center_x, center_y) = self.center_in_world();
        self.world_to_lng_lat(
            point.x + center_x - self.viewport.width / 2.0,
            point.y + center_y - self.viewport.height / 2.0,
        )
    }
}
