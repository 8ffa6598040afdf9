/// Per-tile cell resolution inside a packed wall atlas (pixels)
pub const ATLAS_TILE_SIZE_PX: u32 = 512;

/// Lossy re-encode quality applied to every tile image before compositing
pub const ATLAS_JPEG_QUALITY: u8 = 80;

/// Background colour for atlas cells without a usable image (RGBA)
pub const ATLAS_BACKGROUND: [u8; 4] = [255, 255, 255, 255];
