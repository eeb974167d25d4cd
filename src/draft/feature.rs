use serde::{Deserialize, Serialize};

/// Identifier of a draft, unique among the drafts currently being edited.
pub type DrawId = u64;

/// Property names used when a draft is rendered to GeoJSON.
pub const DRAW_ID_PROPERTY: &str = "drawId";
pub const KIND_PROPERTY: &str = "kind";

/// The drawing mode a draft was created with.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DraftKind {
    Point,
    Line,
    Polygon,
    /// Vertices are constrained by the square's diagonal, so no midpoints are offered.
    Square,
}

impl DraftKind {
    pub fn name(&self) -> &'static str {
        match self {
            DraftKind::Point => "point",
            DraftKind::Line => "line",
            DraftKind::Polygon => "polygon",
            DraftKind::Square => "square",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "point" => Some(DraftKind::Point),
            "line" => Some(DraftKind::Line),
            "polygon" => Some(DraftKind::Polygon),
            "square" => Some(DraftKind::Square),
            _ => None,
        }
    }

    pub fn allows_midpoints(&self) -> bool {
        !matches!(self, DraftKind::Square)
    }
}

/// Anything the draft store can track: it needs an id, a kind and a GeoJSON rendering.
pub trait DraftFeature {
    fn draw_id(&self) -> DrawId;
    fn kind(&self) -> DraftKind;
    fn to_geojson(&self) -> geojson::Feature;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::DraftKind;

    #[rstest]
    #[case(DraftKind::Point, "point")]
    #[case(DraftKind::Line, "line")]
    #[case(DraftKind::Polygon, "polygon")]
    #[case(DraftKind::Square, "square")]
    fn test_kind_names(#[case] kind: DraftKind, #[case] name: &str) {
        assert_eq!(kind.name(), name);
        assert_eq!(DraftKind::from_name(name), Some(kind));
        assert_eq!(serde_json::to_value(kind).unwrap(), serde_json::json!(name));
    }

    #[test]
    fn test_only_squares_skip_midpoints() {
        assert!(!DraftKind::Square.allows_midpoints());
        assert!(DraftKind::Polygon.allows_midpoints());
        assert!(DraftKind::Line.allows_midpoints());
        assert_eq!(DraftKind::from_name("circle"), None);
    }
}
