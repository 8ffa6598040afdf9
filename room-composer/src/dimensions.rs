/// Validated room dimensions expressed in whole tiles
use constants::{DIMENSION_EPSILON, TILE_SIZE, WALL_HEIGHT};

/// Error raised when a requested dimension is not a positive whole
/// multiple of the tile size.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionError {
    pub axis: &'static str,
    pub value: f32,
}

impl std::fmt::Display for DimensionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {}m is not a positive multiple of the {}m tile size",
            self.axis, self.value, TILE_SIZE
        )
    }
}

impl std::error::Error for DimensionError {}

/// Room footprint dimensions in metres, checked at construction.
/// Geometry generation never sees an invalid width or depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomDimensions {
    width: f32,
    depth: f32,
}

impl RoomDimensions {
    /// Validates that both dimensions are positive whole multiples of the
    /// tile size before any geometry can be generated from them.
    pub fn new(width: f32, depth: f32) -> Result<Self, DimensionError> {
        check_axis("width", width)?;
        check_axis("depth", depth)?;
        Ok(Self { width, depth })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Number of tile columns along the X axis.
    pub fn x_count(&self) -> u32 {
        (self.width / TILE_SIZE).round() as u32
    }

    /// Number of tile rows along the Z axis.
    pub fn z_count(&self) -> u32 {
        (self.depth / TILE_SIZE).round() as u32
    }

    /// Number of wall tile levels along the Y axis.
    pub fn y_count(&self) -> u32 {
        (WALL_HEIGHT / TILE_SIZE).round() as u32
    }
}

fn check_axis(axis: &'static str, value: f32) -> Result<(), DimensionError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DimensionError { axis, value });
    }

    let tiles = value / TILE_SIZE;
    if (tiles - tiles.round()).abs() > DIMENSION_EPSILON {
        return Err(DimensionError { axis, value });
    }

    Ok(())
}
