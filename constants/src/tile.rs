/// Edge length of one floor/wall tile in metres
pub const TILE_SIZE: f32 = 0.5;

/// Wall height in metres, fixed across all room templates
pub const WALL_HEIGHT: f32 = 2.5;

/// Tolerance when checking that a dimension is a whole number of tiles
pub const DIMENSION_EPSILON: f32 = 1e-4;
