/// Interface types for the remote texture preprocessing service
use serde::{Deserialize, Serialize};

/// Reply shape of the external upload endpoint. The service accepts a
/// multipart image upload and returns a ready-to-use texture reference;
/// the core consumes `texture_url` as an opaque image reference and
/// performs no HTTP itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureUploadResponse {
    pub success: bool,
    pub texture_url: String,
    pub size: u64,
}
