/// Tile quad geometry and the transient export scene model
use crate::tiles::TileDescriptor;
use constants::TILE_SIZE;

const HALF: f32 = TILE_SIZE / 2.0;

/// Tile-local quad: a tile-sized plane in XZ with a +Y normal. Node
/// rotations orient it for walls; UVs span the full [0,1]² tile space.
pub const QUAD_POSITIONS: [[f32; 3]; 4] = [
    [-HALF, 0.0, -HALF],
    [HALF, 0.0, -HALF],
    [HALF, 0.0, HALF],
    [-HALF, 0.0, HALF],
];

pub const QUAD_NORMALS: [[f32; 3]; 4] = [
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
];

pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Convert an XYZ Euler rotation in radians to an [x, y, z, w]
/// quaternion for scene node transforms.
pub fn euler_to_quaternion(rotation: [f32; 3]) -> [f32; 4] {
    let (s1, c1) = (rotation[0] * 0.5).sin_cos();
    let (s2, c2) = (rotation[1] * 0.5).sin_cos();
    let (s3, c3) = (rotation[2] * 0.5).sin_cos();

    [
        s1 * c2 * c3 + c1 * s2 * s3,
        c1 * s2 * c3 - s1 * c2 * s3,
        c1 * c2 * s3 + s1 * s2 * c3,
        c1 * c2 * c3 - s1 * s2 * s3,
    ]
}

/// One composited atlas ready for embedding: encoded image bytes plus the
/// grid dimensions its tiles were remapped against.
#[derive(Debug, Clone)]
pub struct SceneAtlas {
    pub face_id: String,
    pub jpeg: Vec<u8>,
    pub grid_width: u32,
    pub grid_height: u32,
}

/// Surface appearance of one exported tile.
#[derive(Debug, Clone)]
pub enum TileSurfaceMaterial {
    /// No assigned texture: plain untextured material.
    Neutral,
    /// Textured from a group atlas, with UVs already remapped into the
    /// tile's sub-rectangle.
    Atlas {
        atlas_index: usize,
        uvs: Vec<[f32; 2]>,
    },
}

/// One tile instance of the export scene.
#[derive(Debug, Clone)]
pub struct SceneTile {
    pub descriptor: TileDescriptor,
    pub material: TileSurfaceMaterial,
}

/// The duplicated scene assembled for one export: every tile of the
/// active template plus the composited atlases. Transient; dropped once
/// serialized.
#[derive(Debug, Clone)]
pub struct ExportScene {
    pub template_id: String,
    pub tiles: Vec<SceneTile>,
    pub atlases: Vec<SceneAtlas>,
}
