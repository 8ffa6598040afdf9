/// Room composer command line entry point
use room_composer::exporter::SceneExporter;
use room_composer::fetcher::FileFetcher;
use room_composer::template::{TEMPLATE_CATALOG, find_template};
use room_composer::{RoomTemplate, TextureAssignment};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: {} <template> <assignment.json> <output-dir> [width depth]",
            args[0]
        );
        eprintln!("Templates:");
        for template in TEMPLATE_CATALOG {
            eprintln!(
                "  {:18} {} ({})",
                template.id, template.display_name, template.description
            );
        }
        std::process::exit(1);
    }

    let template = find_template(&args[1])
        .ok_or_else(|| format!("unknown template '{}'", args[1]))?;
    let assignment_path = Path::new(&args[2]);
    let output_dir = Path::new(&args[3]);

    let requested = if args.len() >= 6 {
        Some((args[4].parse::<f32>()?, args[5].parse::<f32>()?))
    } else {
        None
    };
    let dims = template.resolve_dimensions(requested)?;

    println!(
        "Composing '{}' room ({}m x {}m)...",
        template.display_name,
        dims.width(),
        dims.depth()
    );

    // The assignment manifest maps tile keys to image paths, standing in
    // for the interactive paint step.
    let manifest: HashMap<String, String> =
        serde_json::from_str(&fs::read_to_string(assignment_path)?)?;
    let assignment = TextureAssignment::from_map(manifest);
    println!("Loaded {} tile assignments", assignment.len());

    let base_dir = assignment_path.parent().unwrap_or(Path::new("."));
    let fetcher = FileFetcher::with_base_dir(base_dir);

    let exporter = SceneExporter::new();
    let report = exporter.export(template, &dims, &assignment, &fetcher, output_dir)?;

    println!("Export complete:");
    println!("  Atlases: {}", report.atlas_count);
    println!("  Textured tiles: {}", report.total_tile_count);
    println!("  Asset: {}", report.output_path.display());

    save_export_manifest(template, &dims, &report, output_dir)?;
    Ok(())
}

/// Save a JSON summary beside the asset for downstream tooling.
fn save_export_manifest(
    template: &RoomTemplate,
    dims: &room_composer::RoomDimensions,
    report: &room_composer::ExportReport,
    output_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = serde_json::json!({
        "template": template.id,
        "width": dims.width(),
        "depth": dims.depth(),
        "atlas_count": report.atlas_count,
        "total_tile_count": report.total_tile_count,
        "asset": report.output_path.file_name().and_then(|n| n.to_str()),
    });

    let manifest_path = output_dir.join("export_manifest.json");
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
    println!("Saved export manifest: {}", manifest_path.display());

    Ok(())
}
