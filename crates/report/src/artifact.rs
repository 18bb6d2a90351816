//! Exported artifacts and the store that hands out revocable handles

use crate::Result;
use std::fmt::Debug;

/// Issues and revokes transient handles for PDF bytes
pub trait ArtifactStore {
    /// Revocable reference, e.g. an object URL
    type Handle: Clone + Debug + PartialEq;

    /// Take ownership of the bytes and return a live handle
    fn publish(&mut self, pdf: Vec<u8>) -> Result<Self::Handle>;

    /// Release a handle; it must not resolve afterwards
    fn revoke(&mut self, handle: &Self::Handle);
}

/// One exported report
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact<H> {
    pub handle: H,
    /// Download name, ends in `.pdf`
    pub filename: String,
    pub reference: String,
    /// Size of the PDF in bytes
    pub size: usize,
}
