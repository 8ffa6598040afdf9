/// Parametric room composition: tile layout generation, texture atlas
/// compositing, and binary scene export
pub mod assignment;
pub mod atlas;
pub mod dimensions;
pub mod exporter;
pub mod fetcher;
pub mod footprint;
pub mod glb_writer;
pub mod grid;
pub mod groups;
pub mod mesh;
pub mod remap;
pub mod selection;
pub mod template;
pub mod tiles;
pub mod upload;

pub use assignment::TextureAssignment;
pub use dimensions::{DimensionError, RoomDimensions};
pub use exporter::{ExportError, ExportReport, SceneExporter};
pub use fetcher::{FileFetcher, ImageFetcher};
pub use selection::SelectionState;
pub use template::{RoomTemplate, TEMPLATE_CATALOG, find_template};
pub use tiles::{Surface, TileDescriptor};
pub use upload::TextureUploadResponse;
