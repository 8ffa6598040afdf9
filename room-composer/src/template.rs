/// Room template catalog built on footprint shapes
use crate::dimensions::{DimensionError, RoomDimensions};
use crate::footprint::FootprintShape;

/// A named room footprint with its default dimensions.
/// Only the parametric template accepts caller-supplied dimensions; every
/// other template always instantiates at its defaults.
#[derive(Debug, Clone, Copy)]
pub struct RoomTemplate {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub default_width: f32,
    pub default_depth: f32,
    pub shape: FootprintShape,
    pub parametric: bool,
}

pub const TEMPLATE_CATALOG: &[RoomTemplate] = &[
    RoomTemplate {
        id: "small_studio",
        display_name: "Small studio",
        description: "Compact single room (2.5m x 3m)",
        default_width: 2.5,
        default_depth: 3.0,
        shape: FootprintShape::Rect,
        parametric: false,
    },
    RoomTemplate {
        id: "rectangular",
        display_name: "Rectangular room",
        description: "Basic rectangular layout (3m x 4m)",
        default_width: 3.0,
        default_depth: 4.0,
        shape: FootprintShape::Rect,
        parametric: false,
    },
    RoomTemplate {
        id: "lshaped",
        display_name: "L-shaped room",
        description: "Two joined rectangles (5m x 5m)",
        default_width: 5.0,
        default_depth: 5.0,
        shape: FootprintShape::LShape,
        parametric: false,
    },
    RoomTemplate {
        id: "square",
        display_name: "Square room",
        description: "Square layout (4m x 4m)",
        default_width: 4.0,
        default_depth: 4.0,
        shape: FootprintShape::Rect,
        parametric: false,
    },
    RoomTemplate {
        id: "corridor",
        display_name: "Corridor room",
        description: "Long corridor layout (6m x 2.5m)",
        default_width: 6.0,
        default_depth: 2.5,
        shape: FootprintShape::Rect,
        parametric: false,
    },
    RoomTemplate {
        id: "ushaped",
        display_name: "U-shaped room",
        description: "Rectangle with a centred notch (5m x 5m)",
        default_width: 5.0,
        default_depth: 5.0,
        shape: FootprintShape::UShape,
        parametric: false,
    },
    RoomTemplate {
        id: "wide_rectangular",
        display_name: "Wide rectangular room",
        description: "Large open layout (5m x 4m)",
        default_width: 5.0,
        default_depth: 4.0,
        shape: FootprintShape::Rect,
        parametric: false,
    },
    RoomTemplate {
        id: "custom",
        display_name: "Custom room",
        description: "Resizable rectangular layout",
        default_width: 4.0,
        default_depth: 4.0,
        shape: FootprintShape::Rect,
        parametric: true,
    },
];

/// Look up a template by its catalog id.
pub fn find_template(id: &str) -> Option<&'static RoomTemplate> {
    TEMPLATE_CATALOG.iter().find(|t| t.id == id)
}

impl RoomTemplate {
    /// Resolve the dimensions a template instantiates at. Caller-supplied
    /// dimensions are honoured only for the parametric template and are
    /// validated like any other configuration input.
    pub fn resolve_dimensions(
        &self,
        requested: Option<(f32, f32)>,
    ) -> Result<RoomDimensions, DimensionError> {
        match requested {
            Some((width, depth)) if self.parametric => RoomDimensions::new(width, depth),
            _ => RoomDimensions::new(self.default_width, self.default_depth),
        }
    }
}
