/// Tile-to-image assignment map
use std::collections::HashMap;

/// Mapping from tile key to an opaque image reference (a URL, data URI,
/// or file path — the core never interprets it beyond handing it to an
/// `ImageFetcher`). Keys are not validated here; selection already
/// restricts them to the active template.
#[derive(Debug, Default, Clone)]
pub struct TextureAssignment {
    textures: HashMap<String, String>,
}

impl TextureAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign one image reference to every given key, overwriting any
    /// previous assignment.
    pub fn assign<'a, I>(&mut self, keys: I, image_ref: &str)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for key in keys {
            self.textures.insert(key.to_string(), image_ref.to_string());
        }
    }

    /// Drop every assignment. Called on template or dimension change.
    pub fn clear_all(&mut self) {
        self.textures.clear();
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.textures.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.textures
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn from_map(textures: HashMap<String, String>) -> Self {
        Self { textures }
    }
}
