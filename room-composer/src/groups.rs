/// Export-time grouping of assigned tiles by wall face
use crate::assignment::TextureAssignment;
use crate::tiles::parse_key;
use std::collections::BTreeMap;

/// An assigned tile key that the key grammar cannot classify. Geometry
/// generation only ever emits grammar-conforming keys, so hitting this
/// means the invariant between generation and grouping is broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTileKey(pub String);

impl std::fmt::Display for InvalidTileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "assigned tile key '{}' does not match the key grammar", self.0)
    }
}

impl std::error::Error for InvalidTileKey {}

/// One assigned tile folded into a wall group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTile {
    pub key: String,
    pub grid_x: u32,
    pub grid_y: u32,
    pub image_ref: String,
}

/// All assigned tiles of one wall face (or the floor) plus the tight
/// grid bounding box over their coordinates. Built fresh for every
/// export; never constructed empty.
#[derive(Debug, Clone)]
pub struct WallGroup {
    pub face_id: String,
    pub tiles: Vec<GroupTile>,
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl WallGroup {
    fn new(face_id: &str, tile: GroupTile) -> Self {
        Self {
            face_id: face_id.to_string(),
            min_x: tile.grid_x,
            max_x: tile.grid_x,
            min_y: tile.grid_y,
            max_y: tile.grid_y,
            tiles: vec![tile],
        }
    }

    fn push(&mut self, tile: GroupTile) {
        self.min_x = self.min_x.min(tile.grid_x);
        self.max_x = self.max_x.max(tile.grid_x);
        self.min_y = self.min_y.min(tile.grid_y);
        self.max_y = self.max_y.max(tile.grid_y);
        self.tiles.push(tile);
    }

    /// Atlas grid width in tiles.
    pub fn grid_width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Atlas grid height in tiles.
    pub fn grid_height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

/// Partition every assigned tile into per-face wall groups. Faces with no
/// assigned tiles produce no entry; the map is ordered so downstream
/// processing is deterministic.
pub fn group_by_face(
    assignment: &TextureAssignment,
) -> Result<BTreeMap<String, WallGroup>, InvalidTileKey> {
    let mut groups: BTreeMap<String, WallGroup> = BTreeMap::new();

    for (key, image_ref) in assignment.iter() {
        let parsed = parse_key(key).ok_or_else(|| InvalidTileKey(key.to_string()))?;
        let tile = GroupTile {
            key: key.to_string(),
            grid_x: parsed.grid_x,
            grid_y: parsed.grid_y,
            image_ref: image_ref.to_string(),
        };

        match groups.get_mut(&parsed.face_id) {
            Some(group) => group.push(tile),
            None => {
                groups.insert(parsed.face_id.clone(), WallGroup::new(&parsed.face_id, tile));
            }
        }
    }

    Ok(groups)
}
