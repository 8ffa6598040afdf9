/// Tile descriptors and the tile key grammar
///
/// Keys are the contract between geometry generation, selection, texture
/// assignment, and export-time grouping:
///
/// - `floor-{x}-{z}`
/// - `wall-{face}-{coord}-{y}` for single-run faces
/// - `wall-{face}-{segment}-{coord}-{y}` for split faces
/// - `wall-inner-{h|v}-{coord}-{y}` (or segment-labelled) for interior walls

/// Which kind of surface a tile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Floor,
    Wall,
}

/// One addressable tile of the room: its key, surface kind, and transform
/// in metres/radians. Regenerated from scratch whenever the template or
/// its dimensions change.
#[derive(Debug, Clone, PartialEq)]
pub struct TileDescriptor {
    pub key: String,
    pub surface: Surface,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}

/// A tile key split into its face prefix and trailing grid coordinates.
/// For floor tiles the coordinates are `(x, z)`; for wall tiles
/// `(coord, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub face_id: String,
    pub grid_x: u32,
    pub grid_y: u32,
}

/// Parse a tile key into face prefix plus the two trailing integers.
/// Returns None for anything outside the grammar; callers decide whether
/// that is recoverable.
pub fn parse_key(key: &str) -> Option<ParsedKey> {
    let parts: Vec<&str> = key.split('-').collect();
    if parts.len() < 3 {
        return None;
    }

    let grid_x: u32 = parts[parts.len() - 2].parse().ok()?;
    let grid_y: u32 = parts[parts.len() - 1].parse().ok()?;
    let face_id = parts[..parts.len() - 2].join("-");

    match face_id.as_str() {
        "floor" => Some(ParsedKey {
            face_id,
            grid_x,
            grid_y,
        }),
        _ if face_id.starts_with("wall-") && face_id.len() > "wall-".len() => Some(ParsedKey {
            face_id,
            grid_x,
            grid_y,
        }),
        _ => None,
    }
}

pub fn floor_key(x: u32, z: u32) -> String {
    format!("floor-{}-{}", x, z)
}

pub fn wall_key(face_id: &str, coord: u32, y: u32) -> String {
    format!("{}-{}-{}", face_id, coord, y)
}
