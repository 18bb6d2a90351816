//! `html2canvas` rasterizer

use crate::js_error;
use report::{Bitmap, ExportError, RasterOptions, Rasterizer};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlCanvasElement, HtmlElement};

#[wasm_bindgen]
extern "C" {
    /// Global `html2canvas(element, options)` from the host page
    #[wasm_bindgen(js_name = html2canvas, catch)]
    fn html2canvas(element: &HtmlElement, options: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

/// Rasterizes one element with the page's `html2canvas`
pub struct Html2Canvas {
    element: HtmlElement,
}

impl Html2Canvas {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl Rasterizer for Html2Canvas {
    async fn rasterize(&self, options: &RasterOptions) -> report::Result<Bitmap> {
        let options = serde_wasm_bindgen::to_value(options)
            .map_err(|e| ExportError::Raster(e.to_string()))?;

        let promise = html2canvas(&self.element, &options)
            .map_err(|e| ExportError::Raster(js_error(&e)))?;
        let canvas: HtmlCanvasElement = JsFuture::from(promise)
            .await
            .map_err(|e| ExportError::Raster(js_error(&e)))?
            .dyn_into()
            .map_err(|_| ExportError::Raster("html2canvas did not return a canvas".to_string()))?;

        let url = canvas
            .to_data_url_with_type("image/png")
            .map_err(|e| ExportError::Raster(js_error(&e)))?;
        Bitmap::from_data_url(&url)
    }
}
