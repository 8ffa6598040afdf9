/// Binary glTF (.glb) container encoding with embedded atlas images
use crate::mesh::{
    ExportScene, QUAD_INDICES, QUAD_NORMALS, QUAD_POSITIONS, QUAD_UVS, TileSurfaceMaterial,
    euler_to_quaternion,
};
use constants::{MATERIAL_METALLIC, MATERIAL_ROUGHNESS, SCENE_Z_LIFT, UNTEXTURED_BASE_COLOUR};
use serde_json::{Value, json};

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

const COMPONENT_F32: u32 = 5126;
const COMPONENT_U16: u32 = 5123;
const TARGET_ARRAY_BUFFER: u32 = 34962;
const TARGET_ELEMENT_ARRAY_BUFFER: u32 = 34963;
const FILTER_LINEAR: u32 = 9729;
const WRAP_REPEAT: u32 = 10497;

/// Accumulates the binary chunk and its buffer view table. Every view is
/// 4-byte aligned as required for accessor-backed data.
struct BinChunk {
    data: Vec<u8>,
    views: Vec<Value>,
}

impl BinChunk {
    fn new() -> Self {
        Self {
            data: Vec::new(),
            views: Vec::new(),
        }
    }

    fn push_view(&mut self, bytes: &[u8], target: Option<u32>) -> usize {
        while self.data.len() % 4 != 0 {
            self.data.push(0);
        }

        let offset = self.data.len();
        self.data.extend_from_slice(bytes);

        let mut view = json!({
            "buffer": 0,
            "byteOffset": offset,
            "byteLength": bytes.len(),
        });
        if let Some(target) = target {
            view["target"] = json!(target);
        }

        self.views.push(view);
        self.views.len() - 1
    }
}

fn vec3_bytes(values: &[[f32; 3]]) -> Vec<u8> {
    values
        .iter()
        .flatten()
        .flat_map(|v| v.to_le_bytes())
        .collect()
}

fn vec2_bytes(values: &[[f32; 2]]) -> Vec<u8> {
    values
        .iter()
        .flatten()
        .flat_map(|v| v.to_le_bytes())
        .collect()
}

fn u16_bytes(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Encode the export scene as a self-contained GLB byte stream: shared
/// quad geometry, one material per atlas plus a neutral fallback, one
/// node per tile under a single lifted root.
pub fn encode_glb(scene: &ExportScene) -> Result<Vec<u8>, serde_json::Error> {
    let mut bin = BinChunk::new();
    let mut accessors: Vec<Value> = Vec::new();

    // Shared quad geometry. POSITION accessors must declare bounds.
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for p in QUAD_POSITIONS {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }

    let position_view = bin.push_view(&vec3_bytes(&QUAD_POSITIONS), Some(TARGET_ARRAY_BUFFER));
    let position_accessor = accessors.len();
    accessors.push(json!({
        "bufferView": position_view,
        "componentType": COMPONENT_F32,
        "count": QUAD_POSITIONS.len(),
        "type": "VEC3",
        "min": min,
        "max": max,
    }));

    let normal_view = bin.push_view(&vec3_bytes(&QUAD_NORMALS), Some(TARGET_ARRAY_BUFFER));
    let normal_accessor = accessors.len();
    accessors.push(json!({
        "bufferView": normal_view,
        "componentType": COMPONENT_F32,
        "count": QUAD_NORMALS.len(),
        "type": "VEC3",
    }));

    let default_uv_view = bin.push_view(&vec2_bytes(&QUAD_UVS), Some(TARGET_ARRAY_BUFFER));
    let default_uv_accessor = accessors.len();
    accessors.push(json!({
        "bufferView": default_uv_view,
        "componentType": COMPONENT_F32,
        "count": QUAD_UVS.len(),
        "type": "VEC2",
    }));

    let index_view = bin.push_view(&u16_bytes(&QUAD_INDICES), Some(TARGET_ELEMENT_ARRAY_BUFFER));
    let index_accessor = accessors.len();
    accessors.push(json!({
        "bufferView": index_view,
        "componentType": COMPONENT_U16,
        "count": QUAD_INDICES.len(),
        "type": "SCALAR",
    }));

    // One material per atlas, the shared neutral material last.
    let mut images: Vec<Value> = Vec::new();
    let mut textures: Vec<Value> = Vec::new();
    let mut materials: Vec<Value> = Vec::new();

    for atlas in &scene.atlases {
        let image_view = bin.push_view(&atlas.jpeg, None);
        images.push(json!({
            "bufferView": image_view,
            "mimeType": "image/jpeg",
            "name": atlas.face_id,
        }));
        textures.push(json!({ "sampler": 0, "source": images.len() - 1 }));
        materials.push(json!({
            "name": format!("{}-atlas", atlas.face_id),
            "pbrMetallicRoughness": {
                "baseColorTexture": { "index": textures.len() - 1 },
                "baseColorFactor": [1.0, 1.0, 1.0, 1.0],
                "metallicFactor": MATERIAL_METALLIC,
                "roughnessFactor": MATERIAL_ROUGHNESS,
            },
            "doubleSided": true,
        }));
    }

    let neutral_material = materials.len();
    materials.push(json!({
        "name": "untextured",
        "pbrMetallicRoughness": {
            "baseColorFactor": UNTEXTURED_BASE_COLOUR,
            "metallicFactor": MATERIAL_METALLIC,
            "roughnessFactor": MATERIAL_ROUGHNESS,
        },
        "doubleSided": true,
    }));

    // One mesh and one node per tile.
    let mut meshes: Vec<Value> = Vec::new();
    let mut nodes: Vec<Value> = Vec::new();

    for tile in &scene.tiles {
        let (material, uv_accessor) = match &tile.material {
            TileSurfaceMaterial::Neutral => (neutral_material, default_uv_accessor),
            TileSurfaceMaterial::Atlas { atlas_index, uvs } => {
                let view = bin.push_view(&vec2_bytes(uvs), Some(TARGET_ARRAY_BUFFER));
                accessors.push(json!({
                    "bufferView": view,
                    "componentType": COMPONENT_F32,
                    "count": uvs.len(),
                    "type": "VEC2",
                }));
                (*atlas_index, accessors.len() - 1)
            }
        };

        meshes.push(json!({
            "primitives": [{
                "attributes": {
                    "POSITION": position_accessor,
                    "NORMAL": normal_accessor,
                    "TEXCOORD_0": uv_accessor,
                },
                "indices": index_accessor,
                "material": material,
            }],
        }));

        nodes.push(json!({
            "name": tile.descriptor.key,
            "mesh": meshes.len() - 1,
            "translation": tile.descriptor.position,
            "rotation": euler_to_quaternion(tile.descriptor.rotation),
        }));
    }

    let root = nodes.len();
    nodes.push(json!({
        "name": format!("room-{}", scene.template_id),
        "children": (0..root).collect::<Vec<_>>(),
        "translation": [0.0, 0.0, SCENE_Z_LIFT],
    }));

    let mut document = json!({
        "asset": { "version": "2.0", "generator": "room-composer" },
        "buffers": [{ "byteLength": bin.data.len() }],
        "bufferViews": bin.views,
        "accessors": accessors,
        "samplers": [{
            "magFilter": FILTER_LINEAR,
            "minFilter": FILTER_LINEAR,
            "wrapS": WRAP_REPEAT,
            "wrapT": WRAP_REPEAT,
        }],
        "images": images,
        "textures": textures,
        "materials": materials,
        "meshes": meshes,
        "nodes": nodes,
        "scenes": [{ "nodes": [root] }],
        "scene": 0,
    });

    // glTF forbids empty root arrays; a scene without atlases has no
    // image, texture, or sampler entries at all.
    if scene.atlases.is_empty() {
        let doc = document.as_object_mut().unwrap();
        doc.remove("samplers");
        doc.remove("images");
        doc.remove("textures");
    }

    Ok(assemble_chunks(
        serde_json::to_vec(&document)?,
        bin.data,
    ))
}

/// Lay out header, JSON chunk (space padded), and BIN chunk (zero
/// padded), each aligned to 4 bytes.
fn assemble_chunks(mut json_chunk: Vec<u8>, mut bin_chunk: Vec<u8>) -> Vec<u8> {
    while json_chunk.len() % 4 != 0 {
        json_chunk.push(b' ');
    }
    while bin_chunk.len() % 4 != 0 {
        bin_chunk.push(0);
    }

    let total = 12 + 8 + json_chunk.len() + 8 + bin_chunk.len();
    let mut out = Vec::with_capacity(total);

    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());

    out.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json_chunk);

    out.extend_from_slice(&(bin_chunk.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&bin_chunk);

    out
}
