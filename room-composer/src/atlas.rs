/// Wall group atlas compositing
use crate::fetcher::ImageFetcher;
use crate::groups::WallGroup;
use constants::{ATLAS_BACKGROUND, ATLAS_JPEG_QUALITY};
use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{RgbImage, Rgba, RgbaImage, imageops};

/// A packed atlas for one wall group: the raster plus the tile grid
/// dimensions the UV remap needs to address sub-rectangles.
pub struct AtlasTexture {
    pub image: RgbaImage,
    pub grid_width: u32,
    pub grid_height: u32,
}

/// Rasterize every assigned tile image of a group into one atlas. The
/// canvas covers the group's grid bounding box at `tile_size_px` per
/// cell. A tile that cannot be fetched or decoded leaves its cell as
/// background and is logged; only the canvas itself could fail the group.
pub fn composite(
    group: &WallGroup,
    tile_size_px: u32,
    fetcher: &dyn ImageFetcher,
) -> AtlasTexture {
    let grid_width = group.grid_width();
    let grid_height = group.grid_height();
    let mut canvas = RgbaImage::from_pixel(
        grid_width * tile_size_px,
        grid_height * tile_size_px,
        Rgba(ATLAS_BACKGROUND),
    );

    for tile in &group.tiles {
        match normalise_tile_image(&tile.image_ref, tile_size_px, fetcher) {
            Ok(image) => {
                let cell_x = ((tile.grid_x - group.min_x) * tile_size_px) as i64;
                let cell_y = ((tile.grid_y - group.min_y) * tile_size_px) as i64;
                imageops::overlay(&mut canvas, &image, cell_x, cell_y);
            }
            Err(reason) => {
                eprintln!(
                    "Skipping tile {} in '{}' atlas: {}",
                    tile.key, group.face_id, reason
                );
            }
        }
    }

    AtlasTexture {
        image: canvas,
        grid_width,
        grid_height,
    }
}

/// Fetch, decode, and normalise one tile image for compositing: uniform
/// downscale to fit the cell when larger (never upscaled), then the fixed
/// lossy re-encode every exported tile goes through.
fn normalise_tile_image(
    image_ref: &str,
    tile_size_px: u32,
    fetcher: &dyn ImageFetcher,
) -> Result<RgbaImage, String> {
    let bytes = fetcher.fetch(image_ref).map_err(|e| e.to_string())?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;

    let scaled = if decoded.width() > tile_size_px || decoded.height() > tile_size_px {
        decoded.thumbnail(tile_size_px, tile_size_px)
    } else {
        decoded
    };

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, ATLAS_JPEG_QUALITY)
        .encode_image(&scaled.to_rgb8())
        .map_err(|e| e.to_string())?;

    let reencoded = image::load_from_memory(&jpeg).map_err(|e| e.to_string())?;
    Ok(reencoded.to_rgba8())
}

/// Encode a finished atlas as JPEG for embedding in the exported asset.
pub fn encode_atlas_jpeg(atlas: &AtlasTexture) -> Result<Vec<u8>, image::ImageError> {
    let rgb: RgbImage = atlas.image.convert();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, ATLAS_JPEG_QUALITY).encode_image(&rgb)?;
    Ok(jpeg)
}
