/// Scene export pipeline: aggregate, composite, remap, serialize
use crate::assignment::TextureAssignment;
use crate::atlas::{self, AtlasTexture};
use crate::dimensions::RoomDimensions;
use crate::fetcher::ImageFetcher;
use crate::glb_writer::encode_glb;
use crate::grid::{generate_floor, generate_walls};
use crate::groups::{InvalidTileKey, WallGroup, group_by_face};
use crate::mesh::{ExportScene, QUAD_UVS, SceneAtlas, SceneTile, TileSurfaceMaterial};
use crate::remap::remap_uvs;
use crate::template::RoomTemplate;
use constants::ATLAS_TILE_SIZE_PX;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Error types for export operations.
#[derive(Debug)]
pub enum ExportError {
    /// Another export is already running; the request is rejected without
    /// touching the in-flight one.
    ExportInProgress,
    /// An assigned tile key fell outside the key grammar.
    InvalidTileKey(String),
    /// Atlas image encoding for embedding failed.
    ImageEncoding(String),
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
}

impl From<InvalidTileKey> for ExportError {
    fn from(err: InvalidTileKey) -> Self {
        ExportError::InvalidTileKey(err.0)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoError(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::SerializationError(err)
    }
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::ImageEncoding(err.to_string())
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::ExportInProgress => write!(f, "an export is already in progress"),
            ExportError::InvalidTileKey(key) => {
                write!(f, "assigned tile key '{}' does not match the key grammar", key)
            }
            ExportError::ImageEncoding(reason) => write!(f, "atlas encoding failed: {}", reason),
            ExportError::IoError(e) => write!(f, "IO error: {}", e),
            ExportError::SerializationError(e) => write!(f, "serialization error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

/// Summary of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Number of composited atlases (one per wall group with textures).
    pub atlas_count: usize,
    /// Total assigned tiles across all groups.
    pub total_tile_count: usize,
    /// Where the asset was written.
    pub output_path: PathBuf,
}

/// One-shot scene exporter. Exactly one export may run at a time,
/// process-wide: the pipeline works on a single scene duplicate and one
/// batch of texture loads, so a second request is rejected outright
/// rather than queued. After either outcome the exporter is idle again.
#[derive(Debug, Default)]
pub struct SceneExporter {
    exporting: AtomicBool,
}

/// Clears the exporting flag when the pipeline finishes or unwinds.
struct ExportingGuard<'a>(&'a AtomicBool);

impl Drop for ExportingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SceneExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the full export pipeline and write the asset into
    /// `output_dir`. Editing state is read-only here; a failed export
    /// leaves selection and assignment exactly as they were.
    pub fn export(
        &self,
        template: &RoomTemplate,
        dims: &RoomDimensions,
        assignment: &TextureAssignment,
        fetcher: &dyn ImageFetcher,
        output_dir: &Path,
    ) -> Result<ExportReport, ExportError> {
        if self
            .exporting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ExportError::ExportInProgress);
        }
        let _guard = ExportingGuard(&self.exporting);

        self.run_pipeline(template, dims, assignment, fetcher, output_dir)
    }

    fn run_pipeline(
        &self,
        template: &RoomTemplate,
        dims: &RoomDimensions,
        assignment: &TextureAssignment,
        fetcher: &dyn ImageFetcher,
        output_dir: &Path,
    ) -> Result<ExportReport, ExportError> {
        // Stage 1: partition assigned tiles into wall groups.
        let groups = group_by_face(assignment)?;
        let total_tile_count: usize = groups.values().map(|g| g.tiles.len()).sum();

        // Stage 2: composite one atlas per group. Groups share nothing,
        // so they run in parallel; collecting is the barrier that makes
        // every atlas (and its grid dimensions) final before any remap.
        let group_list: Vec<&WallGroup> = groups.values().collect();
        let pb = ProgressBar::new(group_list.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.green/blue}] {pos}/{len} atlases ({percent}%) {msg}")
                .unwrap()
                .progress_chars("█▉▊▋▌▍▎▏"),
        );
        pb.set_message("Compositing wall atlases");

        let atlases: Vec<(String, AtlasTexture)> = group_list
            .par_iter()
            .map(|&group| {
                let atlas = atlas::composite(group, ATLAS_TILE_SIZE_PX, fetcher);
                pb.inc(1);
                (group.face_id.clone(), atlas)
            })
            .collect();
        pb.finish_with_message("Atlases composited");

        // Stage 3: duplicate the scene with remapped UVs and atlas
        // materials.
        let scene = build_scene(template, dims, &groups, &atlases)?;

        // Stage 4: serialize to a single binary asset.
        let glb = encode_glb(&scene)?;
        fs::create_dir_all(output_dir)?;
        let output_path = output_dir.join(format!(
            "room_{}_{}.glb",
            template.id,
            unix_timestamp_millis()
        ));
        fs::write(&output_path, glb)?;

        Ok(ExportReport {
            atlas_count: atlases.len(),
            total_tile_count,
            output_path,
        })
    }
}

/// Assemble the export scene: every tile of the template, with tiles in a
/// composited group carrying remapped UVs and that group's atlas, and all
/// others the neutral untextured material.
fn build_scene(
    template: &RoomTemplate,
    dims: &RoomDimensions,
    groups: &std::collections::BTreeMap<String, WallGroup>,
    atlases: &[(String, AtlasTexture)],
) -> Result<ExportScene, ExportError> {
    let atlas_index_by_face: HashMap<&str, usize> = atlases
        .iter()
        .enumerate()
        .map(|(i, (face_id, _))| (face_id.as_str(), i))
        .collect();

    // Tile key -> (atlas index, grid offset inside the group box).
    let mut placements: HashMap<&str, (usize, u32, u32)> = HashMap::new();
    for group in groups.values() {
        let atlas_index = atlas_index_by_face[group.face_id.as_str()];
        for tile in &group.tiles {
            placements.insert(
                tile.key.as_str(),
                (atlas_index, tile.grid_x - group.min_x, tile.grid_y - group.min_y),
            );
        }
    }

    let tiles = generate_floor(template, dims)
        .into_iter()
        .chain(generate_walls(template, dims))
        .map(|descriptor| {
            let material = match placements.get(descriptor.key.as_str()) {
                Some(&(atlas_index, rel_x, rel_y)) => {
                    let (_, atlas) = &atlases[atlas_index];
                    TileSurfaceMaterial::Atlas {
                        atlas_index,
                        uvs: remap_uvs(
                            &QUAD_UVS,
                            rel_x,
                            rel_y,
                            atlas.grid_width,
                            atlas.grid_height,
                        ),
                    }
                }
                None => TileSurfaceMaterial::Neutral,
            };
            SceneTile {
                descriptor,
                material,
            }
        })
        .collect();

    let atlases = atlases
        .iter()
        .map(|(face_id, atlas)| {
            Ok(SceneAtlas {
                face_id: face_id.clone(),
                jpeg: atlas::encode_atlas_jpeg(atlas)?,
                grid_width: atlas.grid_width,
                grid_height: atlas.grid_height,
            })
        })
        .collect::<Result<Vec<_>, image::ImageError>>()?;

    Ok(ExportScene {
        template_id: template.id.to_string(),
        tiles,
        atlases,
    })
}

fn unix_timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
