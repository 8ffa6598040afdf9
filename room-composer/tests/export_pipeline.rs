/// End-to-end export: select, assign, composite, and read back the GLB.
use image::{Rgba, RgbaImage};
use room_composer::exporter::SceneExporter;
use room_composer::fetcher::FileFetcher;
use room_composer::grid::{generate_floor, generate_walls};
use room_composer::template::find_template;
use room_composer::{SelectionState, TextureAssignment};
use std::fs;
use std::path::PathBuf;

fn workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("room-composer-integration")
        .join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(dir: &PathBuf, name: &str, colour: [u8; 4]) {
    let img = RgbaImage::from_pixel(32, 32, Rgba(colour));
    img.save(dir.join(name)).unwrap();
}

#[test]
fn full_pipeline_produces_readable_glb() {
    let dir = workspace("full-pipeline");
    write_png(&dir, "brick.png", [180, 60, 40, 255]);
    write_png(&dir, "parquet.png", [150, 110, 60, 255]);

    let template = find_template("rectangular").unwrap();
    let dims = template.resolve_dimensions(None).unwrap();

    let all_keys: Vec<String> = generate_floor(template, &dims)
        .into_iter()
        .chain(generate_walls(template, &dims))
        .map(|t| t.key)
        .collect();

    // Paint the whole back wall with brick and one floor tile with
    // parquet, the way the interactive flow would.
    let mut selection = SelectionState::new();
    selection.select_matching(all_keys.iter().map(String::as_str), |k| {
        k.starts_with("wall-back")
    });
    assert_eq!(selection.len(), 30);

    let mut assignment = TextureAssignment::new();
    let selected: Vec<String> = selection.iter().map(str::to_string).collect();
    assignment.assign(selected.iter().map(String::as_str), "brick.png");

    selection.clear();
    selection.toggle("floor-2-3");
    let selected: Vec<String> = selection.iter().map(str::to_string).collect();
    assignment.assign(selected.iter().map(String::as_str), "parquet.png");

    let exporter = SceneExporter::new();
    let report = exporter
        .export(
            template,
            &dims,
            &assignment,
            &FileFetcher::with_base_dir(&dir),
            &dir.join("out"),
        )
        .unwrap();

    // One atlas for the back wall, one for the floor.
    assert_eq!(report.atlas_count, 2);
    assert_eq!(report.total_tile_count, 31);

    let glb = fs::read(&report.output_path).unwrap();
    assert_eq!(&glb[0..4], b"glTF");
    assert_eq!(
        u32::from_le_bytes(glb[8..12].try_into().unwrap()) as usize,
        glb.len()
    );

    let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
    let doc: serde_json::Value = serde_json::from_slice(&glb[20..20 + json_len]).unwrap();

    // Every tile of the 3m x 4m room appears, plus the scene root.
    let node_count = doc["nodes"].as_array().unwrap().len();
    assert_eq!(node_count, 48 + 140 + 1);
    assert_eq!(doc["images"].as_array().unwrap().len(), 2);
    // Two atlas materials plus the shared neutral one.
    assert_eq!(doc["materials"].as_array().unwrap().len(), 3);

    // The embedded images decode back to the painted colours.
    let image_views: Vec<usize> = doc["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["bufferView"].as_u64().unwrap() as usize)
        .collect();
    let bin_start = 20 + json_len + 8;
    for view_index in image_views {
        let view = &doc["bufferViews"][view_index];
        let offset = bin_start + view["byteOffset"].as_u64().unwrap() as usize;
        let length = view["byteLength"].as_u64().unwrap() as usize;
        let decoded = image::load_from_memory(&glb[offset..offset + length]).unwrap();
        assert!(decoded.width() >= 512);
    }
}

#[test]
fn export_after_template_change_uses_fresh_geometry() {
    let dir = workspace("template-change");
    write_png(&dir, "tile.png", [90, 90, 200, 255]);

    // Editing state carries over a template switch only after the reset
    // the caller is required to perform.
    let mut assignment = TextureAssignment::new();
    assignment.assign(["wall-back-0-0"], "tile.png");
    assignment.clear_all();
    assignment.assign(["floor-0-0"], "tile.png");

    let template = find_template("small_studio").unwrap();
    let dims = template.resolve_dimensions(None).unwrap();

    let exporter = SceneExporter::new();
    let report = exporter
        .export(
            template,
            &dims,
            &assignment,
            &FileFetcher::with_base_dir(&dir),
            &dir.join("out"),
        )
        .unwrap();

    assert_eq!(report.atlas_count, 1);
    assert_eq!(report.total_tile_count, 1);

    let name = report.output_path.file_name().unwrap().to_string_lossy();
    assert!(name.starts_with("room_small_studio_"));
}
