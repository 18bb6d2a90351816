//! Object URLs for exported PDFs

use crate::js_error;
use report::{ArtifactStore, ExportError};
use web_sys::{Blob, BlobPropertyBag, Url};

const PDF_MIME: &str = "application/pdf";

/// Publishes PDFs as `blob:` URLs
#[derive(Debug, Default)]
pub struct BlobUrlStore;

impl ArtifactStore for BlobUrlStore {
    type Handle = String;

    fn publish(&mut self, pdf: Vec<u8>) -> report::Result<String> {
        let bytes = js_sys::Uint8Array::from(pdf.as_slice());
        let parts = js_sys::Array::of1(&bytes);

        let options = BlobPropertyBag::new();
        options.set_type(PDF_MIME);

        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| ExportError::Artifact(js_error(&e)))?;
        Url::create_object_url_with_blob(&blob).map_err(|e| ExportError::Artifact(js_error(&e)))
    }

    fn revoke(&mut self, handle: &String) {
        if let Err(e) = Url::revoke_object_url(handle) {
            log::warn!("failed to revoke {handle}: {}", js_error(&e));
        }
    }
}
