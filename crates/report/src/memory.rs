//! In-memory collaborators for hosts without a DOM

use crate::artifact::ArtifactStore;
use crate::form::SelectedFile;
use crate::template::{ImageSlot, PreviewTemplate, TextSlot};
use crate::Result;
use std::collections::HashMap;

/// Artifact store keeping PDFs in a map keyed by `memory:report/<n>`
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    next_id: u64,
    live: HashMap<String, Vec<u8>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes behind a live handle
    pub fn resolve(&self, handle: &str) -> Option<&[u8]> {
        self.live.get(handle).map(Vec::as_slice)
    }

    /// Number of handles not yet revoked
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    type Handle = String;

    fn publish(&mut self, pdf: Vec<u8>) -> Result<String> {
        self.next_id += 1;
        let handle = format!("memory:report/{}", self.next_id);
        self.live.insert(handle.clone(), pdf);
        Ok(handle)
    }

    fn revoke(&mut self, handle: &String) {
        self.live.remove(handle);
    }
}

/// Template that records what was written into each slot
#[derive(Debug, Clone)]
pub struct MemoryTemplate {
    texts: HashMap<TextSlot, String>,
    images: HashMap<ImageSlot, String>,
    barcode_placeholder: bool,
    size: (u32, u32),
}

impl Default for MemoryTemplate {
    fn default() -> Self {
        // A4 at 96 dpi
        Self::with_size(794, 1123)
    }
}

impl MemoryTemplate {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            texts: HashMap::new(),
            images: HashMap::new(),
            barcode_placeholder: true,
            size: (width, height),
        }
    }

    pub fn text(&self, slot: TextSlot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }

    /// Source of a visible image slot
    pub fn image(&self, slot: ImageSlot) -> Option<&str> {
        self.images.get(&slot).map(String::as_str)
    }

    pub fn is_visible(&self, slot: ImageSlot) -> bool {
        self.images.contains_key(&slot)
    }

    pub fn barcode_placeholder_visible(&self) -> bool {
        self.barcode_placeholder
    }
}

impl PreviewTemplate for MemoryTemplate {
    fn set_text(&mut self, slot: TextSlot, text: &str) -> Result<()> {
        self.texts.insert(slot, text.to_string());
        Ok(())
    }

    fn set_image(&mut self, slot: ImageSlot, source: Option<&str>) -> Result<()> {
        match source {
            Some(src) if !src.is_empty() => {
                self.images.insert(slot, src.to_string());
            }
            _ => {
                self.images.remove(&slot);
            }
        }
        Ok(())
    }

    fn set_barcode_placeholder(&mut self, visible: bool) -> Result<()> {
        self.barcode_placeholder = visible;
        Ok(())
    }

    fn scroll_size(&self) -> (u32, u32) {
        self.size
    }

    async fn images_loaded(&self) -> Result<()> {
        Ok(())
    }
}

/// A file already held in memory
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

impl SelectedFile for MemoryFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime.clone()
    }

    async fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
