/// Room footprint predicates over the occupancy grid
use crate::dimensions::RoomDimensions;

/// Footprint strategy deciding which grid cells a room occupies.
/// One variant per template shape; wall generation never branches on the
/// shape itself, only on the occupied/unoccupied transitions it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootprintShape {
    /// Full rectangle covering the whole grid.
    Rect,
    /// Two overlapping slabs: the lower 60% of rows at full width plus the
    /// left 60% of columns at full depth.
    LShape,
    /// Full rectangle minus a centred notch spanning the middle 40% of
    /// columns over the upper 40% of rows.
    UShape,
}

impl FootprintShape {
    /// Whether cell `(x, z)` lies inside the footprint for a grid of
    /// `x_count` by `z_count` cells. Cells outside the grid are never
    /// occupied.
    pub fn occupied(&self, x: u32, z: u32, x_count: u32, z_count: u32) -> bool {
        if x >= x_count || z >= z_count {
            return false;
        }

        match self {
            FootprintShape::Rect => true,
            FootprintShape::LShape => {
                let split_x = (x_count as f32 * 0.6).floor() as u32;
                let split_z = (z_count as f32 * 0.6).floor() as u32;
                z < split_z || x < split_x
            }
            FootprintShape::UShape => {
                let notch_x_start = (x_count as f32 * 0.3).floor() as u32;
                let notch_x_end = (x_count as f32 * 0.7).floor() as u32;
                let notch_z_start = (z_count as f32 * 0.6).floor() as u32;
                !(x >= notch_x_start && x < notch_x_end && z >= notch_z_start)
            }
        }
    }
}

/// Occupancy grid binding a footprint shape to concrete dimensions.
/// The single source of truth for both floor enumeration and wall
/// boundary tracing.
#[derive(Debug, Clone, Copy)]
pub struct OccupancyGrid {
    shape: FootprintShape,
    x_count: u32,
    z_count: u32,
}

impl OccupancyGrid {
    pub fn new(shape: FootprintShape, dims: &RoomDimensions) -> Self {
        Self {
            shape,
            x_count: dims.x_count(),
            z_count: dims.z_count(),
        }
    }

    pub fn x_count(&self) -> u32 {
        self.x_count
    }

    pub fn z_count(&self) -> u32 {
        self.z_count
    }

    /// Signed-coordinate occupancy check. The virtual ring outside the
    /// grid reads as unoccupied, which is what makes the outer boundary
    /// fall out of the same transition rule as interior notches.
    pub fn occupied(&self, x: i64, z: i64) -> bool {
        if x < 0 || z < 0 {
            return false;
        }
        self.shape
            .occupied(x as u32, z as u32, self.x_count, self.z_count)
    }

    /// All occupied cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let (xc, zc) = (self.x_count, self.z_count);
        (0..xc)
            .flat_map(move |x| (0..zc).map(move |z| (x, z)))
            .filter(move |&(x, z)| self.shape.occupied(x, z, xc, zc))
    }
}
