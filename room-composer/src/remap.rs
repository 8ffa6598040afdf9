/// UV remapping of tile meshes into packed atlas space
///
/// A tile mesh carries UVs in local [0,1]² tile space. Remapping scales
/// and offsets them into the tile's sub-rectangle of its group atlas.
/// The input must always be the mesh's original UVs: feeding an already
/// remapped set back in would compound the scaling.

/// Remap a tile's local UVs into atlas space. `tile_grid_x`/`tile_grid_y`
/// are the tile's coordinates relative to the group's bounding box
/// origin; `grid_width`/`grid_height` are the atlas grid dimensions.
pub fn remap_uvs(
    uvs: &[[f32; 2]],
    tile_grid_x: u32,
    tile_grid_y: u32,
    grid_width: u32,
    grid_height: u32,
) -> Vec<[f32; 2]> {
    let gw = grid_width as f32;
    let gh = grid_height as f32;
    let base_u = tile_grid_x as f32 / gw;
    let base_v = tile_grid_y as f32 / gh;

    uvs.iter()
        .map(|&[u, v]| [base_u + u / gw, base_v + v / gh])
        .collect()
}
