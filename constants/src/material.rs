use crate::tile::WALL_HEIGHT;

/// Roughness factor for exported tile materials
pub const MATERIAL_ROUGHNESS: f32 = 0.8;

/// Metallic factor for exported tile materials
pub const MATERIAL_METALLIC: f32 = 0.0;

/// Base colour for tiles exported without an assigned texture (RGBA)
pub const UNTEXTURED_BASE_COLOUR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Z offset applied to the exported scene root
pub const SCENE_Z_LIFT: f32 = WALL_HEIGHT / 2.0;
