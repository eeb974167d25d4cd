use geo::Coord;

use crate::error::DraftError;

use super::DrawId;

/// A GeoJSON position: the planar coordinate plus any further ordinates, e.g. altitude.
#[derive(Clone, Debug, PartialEq)]
pub struct EditPosition {
    pub coord: Coord,
    pub extra: Vec<f64>,
}

impl EditPosition {
    fn parse(draw_id: DrawId, position: &[f64]) -> Result<Self, DraftError> {
        match position {
            [x, y, extra @ ..] => Ok(Self {
                coord: Coord { x: *x, y: *y },
                extra: extra.to_vec(),
            }),
            _ => Err(malformed(
                draw_id,
                format!("position has {} ordinates, expected at least 2", position.len()),
            )),
        }
    }

    pub fn to_geojson(&self) -> Vec<f64> {
        let mut position = Vec::with_capacity(2 + self.extra.len());
        position.extend([self.coord.x, self.coord.y]);
        position.extend(&self.extra);
        position
    }
}

impl From<Coord> for EditPosition {
    fn from(coord: Coord) -> Self {
        Self {
            coord,
            extra: Vec::new(),
        }
    }
}

/// Geometry of a rendered draft, reduced to the variants handle derivation cares about.
#[derive(Clone, Debug, PartialEq)]
pub enum EditGeometry {
    Point(EditPosition),
    LineString(Vec<EditPosition>),
    /// Rings in GeoJSON order, the outer ring first.
    Polygon(Vec<Vec<EditPosition>>),
    /// A well-formed geometry without handles, named by its GeoJSON type.
    Other(&'static str),
}

/// The positions handles are placed on.
/// `closed` rings repeat their first position as the last one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleRing<'a> {
    pub positions: &'a [EditPosition],
    pub closed: bool,
}

impl<'a> HandleRing<'a> {
    /// Number of distinct vertices, i.e. without the closing position of a closed ring.
    pub fn vertex_count(&self) -> usize {
        if self.closed {
            self.positions.len().saturating_sub(1)
        } else {
            self.positions.len()
        }
    }
}

fn malformed(draw_id: DrawId, reason: impl Into<String>) -> DraftError {
    DraftError::MalformedGeometry {
        draw_id,
        reason: reason.into(),
    }
}

fn parse_positions(draw_id: DrawId, positions: &[Vec<f64>]) -> Result<Vec<EditPosition>, DraftError> {
    positions
        .iter()
        .map(|position| EditPosition::parse(draw_id, position))
        .collect()
}

impl EditGeometry {
    /// Parse the geometry of a rendered draft. A feature without geometry is malformed.
    pub fn from_feature(draw_id: DrawId, feature: &geojson::Feature) -> Result<Self, DraftError> {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| malformed(draw_id, "feature has no geometry"))?;
        Self::from_geojson(draw_id, geometry)
    }

    pub fn from_geojson(draw_id: DrawId, geometry: &geojson::Geometry) -> Result<Self, DraftError> {
        use geojson::Value;
        match &geometry.value {
            Value::Point(position) => Ok(EditGeometry::Point(EditPosition::parse(draw_id, position)?)),
            Value::LineString(positions) => Ok(EditGeometry::LineString(parse_positions(
                draw_id, positions,
            )?)),
            Value::Polygon(rings) => {
                if rings.is_empty() {
                    return Err(malformed(draw_id, "polygon has no rings"));
                }
                let rings = rings
                    .iter()
                    .map(|ring| parse_positions(draw_id, ring))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(EditGeometry::Polygon(rings))
            }
            Value::MultiPoint(_) => Ok(EditGeometry::Other("MultiPoint")),
            Value::MultiLineString(_) => Ok(EditGeometry::Other("MultiLineString")),
            Value::MultiPolygon(_) => Ok(EditGeometry::Other("MultiPolygon")),
            Value::GeometryCollection(_) => Ok(EditGeometry::Other("GeometryCollection")),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            EditGeometry::Point(_) => "Point",
            EditGeometry::LineString(_) => "LineString",
            EditGeometry::Polygon(_) => "Polygon",
            EditGeometry::Other(name) => *name,
        }
    }

    /// The ring vertex and midpoint handles are derived from: the positions of a
    /// LineString, or the outer ring of a Polygon. Other geometries have none.
    pub fn handle_ring(&self) -> Option<HandleRing<'_>> {
        match self {
            EditGeometry::LineString(positions) => Some(HandleRing {
                positions,
                closed: false,
            }),
            EditGeometry::Polygon(rings) => rings.first().map(|outer| HandleRing {
                positions: outer,
                closed: true,
            }),
            EditGeometry::Point(_) | EditGeometry::Other(_) => None,
        }
    }

    /// Convert to a planar `geo` geometry. Only the editable variants convert.
    pub fn into_geo(self) -> Option<geo::Geometry> {
        let line = |positions: Vec<EditPosition>| {
            geo::LineString::from(
                positions
                    .into_iter()
                    .map(|position| position.coord)
                    .collect::<Vec<_>>(),
            )
        };
        match self {
            EditGeometry::Point(position) => Some(geo::Geometry::Point(position.coord.into())),
            EditGeometry::LineString(positions) => Some(geo::Geometry::LineString(line(positions))),
            EditGeometry::Polygon(rings) => {
                let mut rings = rings.into_iter().map(line);
                let exterior = rings
                    .next()
                    .unwrap_or_else(|| geo::LineString::from(Vec::<Coord>::new()));
                Some(geo::Geometry::Polygon(geo::Polygon::new(
                    exterior,
                    rings.collect(),
                )))
            }
            EditGeometry::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::Coord;
    use rstest::rstest;

    use crate::error::DraftError;

    use super::EditGeometry;

    fn geometry(value: geojson::Value) -> geojson::Geometry {
        geojson::Geometry::new(value)
    }

    #[test]
    fn test_line_string_ring_is_open() {
        let parsed = EditGeometry::from_geojson(
            1,
            &geometry(geojson::Value::LineString(vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
            ])),
        )
        .unwrap();
        let ring = parsed.handle_ring().unwrap();
        assert!(!ring.closed);
        assert_eq!(3, ring.vertex_count());
        assert_eq!(Coord { x: 1.0, y: 1.0 }, ring.positions[2].coord);
    }

    #[test]
    fn test_polygon_ring_is_outer_and_closed() {
        let outer = vec![
            vec![0.0, 0.0],
            vec![4.0, 0.0],
            vec![4.0, 4.0],
            vec![0.0, 0.0],
        ];
        let hole = vec![
            vec![1.0, 1.0],
            vec![2.0, 1.0],
            vec![2.0, 2.0],
            vec![1.0, 1.0],
        ];
        let parsed =
            EditGeometry::from_geojson(1, &geometry(geojson::Value::Polygon(vec![outer, hole])))
                .unwrap();
        let ring = parsed.handle_ring().unwrap();
        assert!(ring.closed);
        assert_eq!(4, ring.positions.len());
        assert_eq!(3, ring.vertex_count());
        assert_eq!(Coord { x: 4.0, y: 0.0 }, ring.positions[1].coord);
    }

    #[test]
    fn test_extra_ordinates_are_kept() {
        let parsed = EditGeometry::from_geojson(
            1,
            &geometry(geojson::Value::LineString(vec![
                vec![0.0, 0.0, 30.0],
                vec![1.0, 0.0],
            ])),
        )
        .unwrap();
        let ring = parsed.handle_ring().unwrap();
        assert_eq!(vec![30.0], ring.positions[0].extra);
        assert_eq!(vec![0.0, 0.0, 30.0], ring.positions[0].to_geojson());
        assert!(ring.positions[1].extra.is_empty());
    }

    #[rstest]
    #[case(geojson::Value::Point(vec![1.0, 2.0]), "Point")]
    #[case(geojson::Value::MultiPoint(vec![vec![1.0, 2.0]]), "MultiPoint")]
    #[case(geojson::Value::MultiLineString(vec![]), "MultiLineString")]
    #[case(geojson::Value::MultiPolygon(vec![]), "MultiPolygon")]
    #[case(geojson::Value::GeometryCollection(vec![]), "GeometryCollection")]
    fn test_geometries_without_handles(#[case] value: geojson::Value, #[case] name: &str) {
        let parsed = EditGeometry::from_geojson(1, &geometry(value)).unwrap();
        assert_eq!(name, parsed.type_name());
        assert_eq!(None, parsed.handle_ring());
    }

    #[rstest]
    #[case(geojson::Value::Point(vec![1.0]))]
    #[case(geojson::Value::LineString(vec![vec![0.0, 0.0], vec![]]))]
    #[case(geojson::Value::Polygon(vec![]))]
    fn test_malformed_geometry(#[case] value: geojson::Value) {
        let result = EditGeometry::from_geojson(7, &geometry(value));
        assert!(matches!(
            result,
            Err(DraftError::MalformedGeometry { draw_id: 7, .. })
        ));
    }

    #[test]
    fn test_feature_without_geometry_is_malformed() {
        let feature = geojson::Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        assert!(EditGeometry::from_feature(3, &feature).is_err());
    }

    #[test]
    fn test_empty_closed_ring_has_no_vertices() {
        let parsed =
            EditGeometry::from_geojson(1, &geometry(geojson::Value::Polygon(vec![vec![]])))
                .unwrap();
        assert_eq!(0, parsed.handle_ring().unwrap().vertex_count());
    }
}
