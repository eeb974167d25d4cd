use geo::Coord;
use serde_json::Value as JsonValue;

use crate::error::DraftError;

use super::{
    feature::{DRAW_ID_PROPERTY, KIND_PROPERTY},
    DraftFeature, DraftKind, DrawId, EditGeometry,
};

/// A feature being drawn, backed by a `geo` geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    pub draw_id: DrawId,
    pub kind: DraftKind,
    pub geometry: geo::Geometry,
    /// Extra properties carried through to the rendered GeoJSON.
    pub attributes: Option<geojson::JsonObject>,
}

impl Draft {
    pub fn new(draw_id: DrawId, kind: DraftKind, geometry: geo::Geometry) -> Self {
        Self {
            draw_id,
            kind,
            geometry,
            attributes: None,
        }
    }

    pub fn point(draw_id: DrawId, coord: Coord) -> Self {
        Self::new(draw_id, DraftKind::Point, geo::Geometry::Point(coord.into()))
    }

    pub fn line(draw_id: DrawId, coords: Vec<Coord>) -> Self {
        Self::new(
            draw_id,
            DraftKind::Line,
            geo::Geometry::LineString(coords.into()),
        )
    }

    /// Polygon from its outer ring. The ring is closed if it is not already.
    pub fn polygon(draw_id: DrawId, ring: Vec<Coord>) -> Self {
        Self::new(
            draw_id,
            DraftKind::Polygon,
            geo::Geometry::Polygon(geo::Polygon::new(ring.into(), vec![])),
        )
    }

    /// Axis-aligned square spanned from `corner` towards `towards`. The side is the longer
    /// of the two extents, so `towards` lies on the square's boundary.
    pub fn square(draw_id: DrawId, corner: Coord, towards: Coord) -> Self {
        let dx = towards.x - corner.x;
        let dy = towards.y - corner.y;
        let side = dx.abs().max(dy.abs());
        let opposite = Coord {
            x: corner.x + side * dx.signum(),
            y: corner.y + side * dy.signum(),
        };
        let ring = vec![
            corner,
            Coord {
                x: opposite.x,
                y: corner.y,
            },
            opposite,
            Coord {
                x: corner.x,
                y: opposite.y,
            },
            corner,
        ];
        Self::new(
            draw_id,
            DraftKind::Square,
            geo::Geometry::Polygon(geo::Polygon::new(ring.into(), vec![])),
        )
    }

    pub fn with_attributes(mut self, attributes: geojson::JsonObject) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

impl DraftFeature for Draft {
    fn draw_id(&self) -> DrawId {
        self.draw_id
    }

    fn kind(&self) -> DraftKind {
        self.kind
    }

    fn to_geojson(&self) -> geojson::Feature {
        let mut properties = self.attributes.clone().unwrap_or_default();
        properties.insert(DRAW_ID_PROPERTY.to_string(), JsonValue::from(self.draw_id));
        properties.insert(KIND_PROPERTY.to_string(), JsonValue::from(self.kind.name()));
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&self.geometry))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

impl TryFrom<geojson::Feature> for Draft {
    type Error = DraftError;

    fn try_from(feature: geojson::Feature) -> Result<Self, DraftError> {
        let draw_id = feature
            .property(DRAW_ID_PROPERTY)
            .and_then(JsonValue::as_u64)
            .ok_or(DraftError::MissingDrawId)?;
        let geometry = EditGeometry::from_feature(draw_id, &feature)?;
        let kind = match feature.property(KIND_PROPERTY) {
            Some(JsonValue::String(name)) => DraftKind::from_name(name)
                .ok_or_else(|| DraftError::UnknownKind(name.to_owned()))?,
            Some(other) => return Err(DraftError::UnknownKind(other.to_string())),
            None => match &geometry {
                EditGeometry::Point(_) => DraftKind::Point,
                EditGeometry::LineString(_) => DraftKind::Line,
                EditGeometry::Polygon(_) => DraftKind::Polygon,
                EditGeometry::Other(name) => {
                    return Err(DraftError::UnsupportedGeometry(name.to_string()))
                }
            },
        };
        let type_name = geometry.type_name();
        let geometry = geometry
            .into_geo()
            .ok_or_else(|| DraftError::UnsupportedGeometry(type_name.to_string()))?;

        let attributes = feature.properties.map(|mut properties| {
            properties.remove(DRAW_ID_PROPERTY);
            properties.remove(KIND_PROPERTY);
            properties
        });
        let attributes = attributes.filter(|properties| !properties.is_empty());

        Ok(Self {
            draw_id,
            kind,
            geometry,
            attributes,
        })
    }
}
