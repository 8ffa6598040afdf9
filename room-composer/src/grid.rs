/// Tile layout generation via occupancy-grid boundary tracing
use crate::dimensions::RoomDimensions;
use crate::footprint::OccupancyGrid;
use crate::template::RoomTemplate;
use crate::tiles::{Surface, TileDescriptor, floor_key, wall_key};
use constants::TILE_SIZE;
use std::collections::BTreeMap;
use std::f32::consts::FRAC_PI_2;

/// Outward normal direction of a wall boundary edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum FaceDir {
    Back,
    Front,
    Left,
    Right,
}

impl FaceDir {
    fn name(self) -> &'static str {
        match self {
            FaceDir::Back => "back",
            FaceDir::Front => "front",
            FaceDir::Left => "left",
            FaceDir::Right => "right",
        }
    }

    /// Tile rotation orienting the quad normal along this direction.
    fn rotation(self) -> [f32; 3] {
        match self {
            FaceDir::Back => [-FRAC_PI_2, 0.0, 0.0],
            FaceDir::Front => [FRAC_PI_2, 0.0, 0.0],
            FaceDir::Left => [0.0, 0.0, FRAC_PI_2],
            FaceDir::Right => [0.0, 0.0, -FRAC_PI_2],
        }
    }

    /// Back/front walls run along the X axis, left/right along Z.
    fn runs_along_x(self) -> bool {
        matches!(self, FaceDir::Back | FaceDir::Front)
    }
}

/// One contiguous run of boundary edges sharing a face direction and a
/// grid line, already carrying the key prefix it will emit under.
#[derive(Debug, Clone)]
struct WallRun {
    face_id: String,
    dir: FaceDir,
    line: u32,
    coords: Vec<u32>,
}

/// Generate one floor tile per occupied footprint cell, centred inside
/// the cell.
pub fn generate_floor(template: &RoomTemplate, dims: &RoomDimensions) -> Vec<TileDescriptor> {
    let grid = OccupancyGrid::new(template.shape, dims);

    grid.cells()
        .map(|(x, z)| TileDescriptor {
            key: floor_key(x, z),
            surface: Surface::Floor,
            position: [
                x as f32 * TILE_SIZE + TILE_SIZE / 2.0,
                0.0,
                z as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            ],
            rotation: [0.0, 0.0, 0.0],
        })
        .collect()
}

/// Generate wall tiles by tracing occupied/unoccupied transitions across
/// the footprint, one tile per boundary edge per height level. The same
/// rule covers outer walls, split faces, and the interior walls of
/// non-convex footprints.
pub fn generate_walls(template: &RoomTemplate, dims: &RoomDimensions) -> Vec<TileDescriptor> {
    let grid = OccupancyGrid::new(template.shape, dims);
    let runs = trace_wall_runs(&grid);

    let mut tiles = Vec::new();
    for y in 0..dims.y_count() {
        let y_pos = y as f32 * TILE_SIZE + TILE_SIZE / 2.0;

        for run in &runs {
            for &coord in &run.coords {
                let along = coord as f32 * TILE_SIZE + TILE_SIZE / 2.0;
                let line = run.line as f32 * TILE_SIZE;
                let position = if run.dir.runs_along_x() {
                    [along, y_pos, line]
                } else {
                    [line, y_pos, along]
                };

                tiles.push(TileDescriptor {
                    key: wall_key(&run.face_id, coord, y),
                    surface: Surface::Wall,
                    position,
                    rotation: run.dir.rotation(),
                });
            }
        }
    }

    tiles
}

/// Trace every boundary edge of the footprint and fold the edges into
/// named contiguous runs.
fn trace_wall_runs(grid: &OccupancyGrid) -> Vec<WallRun> {
    // Edge coordinates per (direction, grid line).
    let mut edges: BTreeMap<(FaceDir, u32), Vec<u32>> = BTreeMap::new();

    for (x, z) in grid.cells() {
        let (xi, zi) = (x as i64, z as i64);
        if !grid.occupied(xi, zi - 1) {
            edges.entry((FaceDir::Back, z)).or_default().push(x);
        }
        if !grid.occupied(xi, zi + 1) {
            edges.entry((FaceDir::Front, z + 1)).or_default().push(x);
        }
        if !grid.occupied(xi - 1, zi) {
            edges.entry((FaceDir::Left, x)).or_default().push(z);
        }
        if !grid.occupied(xi + 1, zi) {
            edges.entry((FaceDir::Right, x + 1)).or_default().push(z);
        }
    }

    let mut outer: BTreeMap<FaceDir, Vec<WallRun>> = BTreeMap::new();
    let mut inner_h: Vec<WallRun> = Vec::new();
    let mut inner_v: Vec<WallRun> = Vec::new();

    for ((dir, line), mut coords) in edges {
        coords.sort_unstable();
        let outer_line = match dir {
            FaceDir::Back | FaceDir::Left => 0,
            FaceDir::Front => grid.z_count(),
            FaceDir::Right => grid.x_count(),
        };

        for coords in split_contiguous(&coords) {
            let run = WallRun {
                face_id: String::new(),
                dir,
                line,
                coords,
            };
            if line == outer_line {
                outer.entry(dir).or_default().push(run);
            } else if dir.runs_along_x() {
                inner_h.push(run);
            } else {
                inner_v.push(run);
            }
        }
    }

    let mut runs = Vec::new();
    for (dir, mut face_runs) in outer {
        face_runs.sort_by_key(|r| r.coords[0]);
        let labels = segment_labels(face_runs.len(), dir.runs_along_x());
        for (run, label) in face_runs.iter_mut().zip(labels) {
            run.face_id = match label {
                Some(label) => format!("wall-{}-{}", dir.name(), label),
                None => format!("wall-{}", dir.name()),
            };
        }
        runs.extend(face_runs);
    }

    runs.extend(name_inner_runs(inner_h, 'h', true));
    runs.extend(name_inner_runs(inner_v, 'v', false));
    runs
}

/// Split a sorted coordinate list into maximal contiguous runs.
fn split_contiguous(coords: &[u32]) -> Vec<Vec<u32>> {
    let mut runs: Vec<Vec<u32>> = Vec::new();
    for &c in coords {
        match runs.last_mut() {
            Some(run) if *run.last().unwrap() + 1 == c => run.push(c),
            _ => runs.push(vec![c]),
        }
    }
    runs
}

/// Positional segment labels for a face split into several runs. A single
/// run needs no label; two runs get side names along the face axis.
fn segment_labels(count: usize, along_x: bool) -> Vec<Option<String>> {
    match count {
        1 => vec![None],
        2 if along_x => vec![Some("left".into()), Some("right".into())],
        2 => vec![Some("bottom".into()), Some("top".into())],
        _ => (0..count).map(|i| Some(format!("s{}", i))).collect(),
    }
}

/// Name interior runs: a lone run of an orientation keeps the plain
/// `wall-inner-h`/`wall-inner-v` prefix, several runs are disambiguated
/// by their position across the footprint.
fn name_inner_runs(mut runs: Vec<WallRun>, axis: char, horizontal: bool) -> Vec<WallRun> {
    runs.sort_by_key(|r| (r.line, r.coords[0]));
    let count = runs.len();

    for (i, run) in runs.iter_mut().enumerate() {
        run.face_id = match count {
            1 => format!("wall-inner-{}", axis),
            2 if horizontal => format!("wall-inner-{}", ["bottom", "top"][i]),
            2 => format!("wall-inner-{}", ["left", "right"][i]),
            _ => format!("wall-inner-{}{}", axis, i),
        };
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::find_template;
    use std::collections::HashSet;

    fn descriptors(id: &str) -> (Vec<TileDescriptor>, Vec<TileDescriptor>) {
        let template = find_template(id).unwrap();
        let dims = template.resolve_dimensions(None).unwrap();
        (
            generate_floor(template, &dims),
            generate_walls(template, &dims),
        )
    }

    /// Quantize a position to half-tile units for exact set comparison.
    fn snap(p: [f32; 3]) -> (i32, i32, i32) {
        (
            (p[0] * 4.0).round() as i32,
            (p[1] * 4.0).round() as i32,
            (p[2] * 4.0).round() as i32,
        )
    }

    #[test]
    fn test_generation_is_deterministic() {
        for id in ["rectangular", "lshaped", "ushaped"] {
            let (floor_a, walls_a) = descriptors(id);
            let (floor_b, walls_b) = descriptors(id);
            assert_eq!(floor_a, floor_b);
            assert_eq!(walls_a, walls_b);
        }
    }

    #[test]
    fn test_keys_are_unique_across_all_templates() {
        for template in crate::template::TEMPLATE_CATALOG {
            let dims = template.resolve_dimensions(None).unwrap();
            let mut seen = HashSet::new();
            for tile in generate_floor(template, &dims)
                .into_iter()
                .chain(generate_walls(template, &dims))
            {
                assert!(seen.insert(tile.key.clone()), "duplicate key {}", tile.key);
            }
        }
    }

    #[test]
    fn test_floor_matches_footprint_cells() {
        for template in crate::template::TEMPLATE_CATALOG {
            let dims = template.resolve_dimensions(None).unwrap();
            let grid = OccupancyGrid::new(template.shape, &dims);

            let from_floor: HashSet<String> = generate_floor(template, &dims)
                .iter()
                .map(|t| t.key.clone())
                .collect();
            let from_footprint: HashSet<String> =
                grid.cells().map(|(x, z)| floor_key(x, z)).collect();
            assert_eq!(from_floor, from_footprint, "template {}", template.id);
        }
    }

    #[test]
    fn test_box_floor_and_wall_counts() {
        // 3m x 4m room: 6x8 floor cells, 5 wall levels.
        let (floor, walls) = descriptors("rectangular");
        assert_eq!(floor.len(), 48);
        assert_eq!(walls.len(), 2 * 6 * 5 + 2 * 8 * 5);
    }

    #[test]
    fn test_box_faces_and_positions() {
        let (_, walls) = descriptors("rectangular");

        let back: Vec<_> = walls
            .iter()
            .filter(|t| t.key.starts_with("wall-back-"))
            .collect();
        assert_eq!(back.len(), 30);
        for tile in &back {
            assert_eq!(tile.position[2], 0.0);
            assert_eq!(tile.rotation, [-FRAC_PI_2, 0.0, 0.0]);
        }

        let right: Vec<_> = walls
            .iter()
            .filter(|t| t.key.starts_with("wall-right-"))
            .collect();
        assert_eq!(right.len(), 40);
        for tile in &right {
            assert_eq!(tile.position[0], 3.0);
            assert_eq!(tile.rotation, [0.0, 0.0, -FRAC_PI_2]);
        }
    }

    /// Independently enumerate boundary edges and check that wall tiles
    /// cover each edge exactly once per height level.
    fn assert_boundary_coverage(id: &str) {
        let template = find_template(id).unwrap();
        let dims = template.resolve_dimensions(None).unwrap();
        let grid = OccupancyGrid::new(template.shape, &dims);
        let walls = generate_walls(template, &dims);

        let mut expected = HashSet::new();
        for x in 0..dims.x_count() {
            for z in 0..dims.z_count() {
                let (xi, zi) = (x as i64, z as i64);
                if !grid.occupied(xi, zi) {
                    continue;
                }
                let cx = x as f32 * TILE_SIZE + TILE_SIZE / 2.0;
                let cz = z as f32 * TILE_SIZE + TILE_SIZE / 2.0;
                if !grid.occupied(xi, zi - 1) {
                    expected.insert(snap([cx, 0.25, z as f32 * TILE_SIZE]));
                }
                if !grid.occupied(xi, zi + 1) {
                    expected.insert(snap([cx, 0.25, (z + 1) as f32 * TILE_SIZE]));
                }
                if !grid.occupied(xi - 1, zi) {
                    expected.insert(snap([x as f32 * TILE_SIZE, 0.25, cz]));
                }
                if !grid.occupied(xi + 1, zi) {
                    expected.insert(snap([(x + 1) as f32 * TILE_SIZE, 0.25, cz]));
                }
            }
        }

        let level0: Vec<_> = walls.iter().filter(|t| t.key.ends_with("-0")).collect();
        assert_eq!(level0.len(), expected.len(), "template {}", id);

        let actual: HashSet<_> = level0.iter().map(|t| snap(t.position)).collect();
        assert_eq!(actual, expected, "template {}", id);
        assert_eq!(walls.len(), expected.len() * dims.y_count() as usize);
    }

    #[test]
    fn test_boundary_tracing_rectangular() {
        assert_boundary_coverage("rectangular");
    }

    #[test]
    fn test_boundary_tracing_lshape() {
        assert_boundary_coverage("lshaped");
    }

    #[test]
    fn test_boundary_tracing_ushape() {
        assert_boundary_coverage("ushaped");
    }

    #[test]
    fn test_lshape_emits_inner_walls_at_the_notch() {
        let (_, walls) = descriptors("lshaped");
        let keys: HashSet<_> = walls.iter().map(|t| t.key.as_str()).collect();

        // 10x10 grid split at 6: the notch spans x,z in [6, 10).
        for c in 6..10 {
            assert!(keys.contains(format!("wall-inner-h-{}-0", c).as_str()));
            assert!(keys.contains(format!("wall-inner-v-{}-0", c).as_str()));
        }
        // Outer faces stay single runs.
        assert!(keys.contains("wall-left-9-0"));
        assert!(keys.contains("wall-front-5-0"));
        assert!(keys.contains("wall-right-5-0"));
        assert!(!keys.contains("wall-front-6-0"));
        assert!(!keys.contains("wall-right-6-0"));
    }

    #[test]
    fn test_ushape_emits_split_front_and_notch_walls() {
        let (_, walls) = descriptors("ushaped");
        let keys: HashSet<_> = walls.iter().map(|t| t.key.as_str()).collect();

        // Front face splits around the notch: x in [0, 3) and [7, 10).
        for x in 0..3 {
            assert!(keys.contains(format!("wall-front-left-{}-0", x).as_str()));
        }
        for x in 7..10 {
            assert!(keys.contains(format!("wall-front-right-{}-0", x).as_str()));
        }
        // Notch side walls are named by their position, the notch floor
        // wall keeps the plain horizontal-inner prefix.
        for z in 6..10 {
            assert!(keys.contains(format!("wall-inner-left-{}-0", z).as_str()));
            assert!(keys.contains(format!("wall-inner-right-{}-0", z).as_str()));
        }
        for x in 3..7 {
            assert!(keys.contains(format!("wall-inner-h-{}-0", x).as_str()));
        }
    }

    #[test]
    fn test_inner_wall_rotations_face_out_of_the_footprint() {
        let (_, walls) = descriptors("ushaped");

        let notch_left = walls
            .iter()
            .find(|t| t.key == "wall-inner-left-6-0")
            .unwrap();
        assert_eq!(notch_left.rotation, [0.0, 0.0, -FRAC_PI_2]);
        assert_eq!(snap(notch_left.position).0, 6); // x = 1.5m

        let notch_right = walls
            .iter()
            .find(|t| t.key == "wall-inner-right-6-0")
            .unwrap();
        assert_eq!(notch_right.rotation, [0.0, 0.0, FRAC_PI_2]);
        assert_eq!(snap(notch_right.position).0, 14); // x = 3.5m
    }

    #[test]
    fn test_wall_levels_span_wall_height() {
        let (_, walls) = descriptors("square");
        let top = walls.iter().map(|t| snap(t.position).1).max().unwrap();
        // Highest tile centre: 2.25m.
        assert_eq!(top, 9);
        assert!(walls.iter().any(|t| t.key == "wall-back-0-4"));
        assert!(!walls.iter().any(|t| t.key == "wall-back-0-5"));
    }
}
