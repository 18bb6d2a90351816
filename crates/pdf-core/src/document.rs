//! PDF Document wrapper

use crate::image::{
    calculate_scaled_dimensions, center_in_box, generate_image_operators, ImageScaleMode,
    ImageXObject,
};
use crate::{PageConfig, PdfError, Rect, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::HashMap;

/// PDF Document wrapper providing high-level operations
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Page setup used for new pages and caller coordinates
    config: PageConfig,
    /// Root Pages node
    pages_id: ObjectId,
    /// Next image resource number
    next_image_resource: u32,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: HashMap<usize, Vec<u8>>,
    /// Link annotations waiting to be attached (page number -> annotation IDs)
    pending_annotations: HashMap<usize, Vec<ObjectId>>,
}

impl PdfDocument {
    /// Create an empty document (no pages yet)
    ///
    /// # Example
    /// ```ignore
    /// let mut doc = PdfDocument::new(PageConfig::default());
    /// doc.add_blank_page()?;
    /// ```
    pub fn new(config: PageConfig) -> Self {
        let mut inner = Document::with_version("1.5");

        let pages_id = inner.new_object_id();
        inner.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );

        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        Self {
            inner,
            config,
            pages_id,
            next_image_resource: 1,
            page_content_buffer: HashMap::new(),
            pending_annotations: HashMap::new(),
        }
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Page width in the configured unit
    pub fn page_width(&self) -> f64 {
        self.config.size().0
    }

    /// Page height in the configured unit
    pub fn page_height(&self) -> f64 {
        self.config.size().1
    }

    /// Add a blank page sized by the document's page configuration
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_blank_page(&mut self) -> Result<usize> {
        let (width, height) = self.config.size_pt();

        let contents_id = self
            .inner
            .add_object(Stream::new(Dictionary::new(), Vec::new()));

        let page_id = self.inner.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), Object::Real(width as f32), Object::Real(height as f32)],
            "Resources" => Dictionary::new(),
            "Contents" => contents_id,
        });

        let pages_dict = self
            .inner
            .get_object_mut(self.pages_id)?
            .as_dict_mut()
            .map_err(|_| PdfError::ParseError("Pages object is not a dictionary".to_string()))?;

        let mut kids = pages_dict
            .get(b"Kids")
            .and_then(Object::as_array)
            .map_err(|_| PdfError::ParseError("Pages object missing Kids array".to_string()))?
            .clone();
        kids.push(Object::Reference(page_id));
        let count = kids.len() as i64;

        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", count);

        Ok(count as usize)
    }

    /// Insert an image covering the whole page
    ///
    /// `ImageScaleMode::Stretch` fills the page exactly; `FitBox` keeps the
    /// aspect ratio and centers the image, leaving margins on one axis.
    ///
    /// # Returns
    /// The rectangle the image occupies, in the configured unit
    pub fn insert_image_fitted(
        &mut self,
        data: &[u8],
        page: usize,
        mode: ImageScaleMode,
    ) -> Result<Rect> {
        self.check_page(page)?;

        let (image_resource_name, orig_width, orig_height) = self.embed_image(data, page)?;

        let (page_width, page_height) = self.config.size_pt();
        let (width, height) =
            calculate_scaled_dimensions(orig_width, orig_height, page_width, page_height, mode);
        let (x, y) = center_in_box(width, height, page_width, page_height);

        self.draw_image(page, &image_resource_name, x, y, width, height);

        let unit = self.config.unit;
        Ok(Rect::new(
            unit.from_points(x),
            unit.from_points(y),
            unit.from_points(width),
            unit.from_points(height),
        ))
    }

    /// Add an invisible clickable region that opens `uri`
    ///
    /// # Arguments
    /// * `page` - Page number (1-indexed)
    /// * `rect` - Clickable area in the configured unit, from the top-left
    /// * `uri` - Destination address
    pub fn add_link(&mut self, page: usize, rect: Rect, uri: &str) -> Result<()> {
        self.check_page(page)?;

        if uri.trim().is_empty() {
            return Err(PdfError::InvalidLink(uri.to_string()));
        }

        let (_, page_height) = self.config.size_pt();
        let r = rect.to_points(self.config.unit);
        let bottom = page_height - r.y - r.height;

        let annotation_id = self.inner.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![
                Object::Real(r.x as f32),
                Object::Real(bottom as f32),
                Object::Real((r.x + r.width) as f32),
                Object::Real((bottom + r.height) as f32),
            ],
            "Border" => vec![0.into(), 0.into(), 0.into()],
            "A" => dictionary! {
                "S" => "URI",
                "URI" => Object::String(uri.as_bytes().to_vec(), StringFormat::Literal),
            },
        });

        self.pending_annotations
            .entry(page)
            .or_default()
            .push(annotation_id);

        log::debug!("link annotation on page {page} -> {uri}");
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.flush_content_buffers()?;
        self.attach_annotations()?;

        if self.config.compress {
            self.inner.compress();
        }

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    fn check_page(&self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(())
    }

    fn page_id(&self, page: usize) -> Result<ObjectId> {
        let pages = self.inner.get_pages();
        pages
            .get(&(page as u32))
            .copied()
            .ok_or(PdfError::InvalidPage(page, pages.len()))
    }

    /// Queue drawing operators; `y` is measured from the top in points
    fn draw_image(&mut self, page: usize, name: &str, x: f64, y: f64, width: f64, height: f64) {
        let (_, page_height) = self.config.size_pt();
        let pdf_y = page_height - y - height;
        let operators = generate_image_operators(name, x, pdf_y, width, height);
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(&operators);
    }

    /// Flush all buffered content to page streams
    fn flush_content_buffers(&mut self) -> Result<()> {
        let buffers: Vec<(usize, Vec<u8>)> = self.page_content_buffer.drain().collect();

        for (page, content) in buffers {
            if !content.is_empty() {
                self.append_to_content_stream(page, content)?;
            }
        }

        Ok(())
    }

    /// Append content to a page's content stream
    fn append_to_content_stream(&mut self, page: usize, content: Vec<u8>) -> Result<()> {
        let page_id = self.page_id(page)?;

        let existing_id = self
            .inner
            .get_dictionary(page_id)?
            .get(b"Contents")
            .and_then(Object::as_reference)
            .ok();

        match existing_id {
            Some(stream_id) => {
                let stream = self
                    .inner
                    .get_object_mut(stream_id)?
                    .as_stream_mut()
                    .map_err(|_| PdfError::ParseError("Contents is not a stream".to_string()))?;
                let mut combined = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                combined.extend_from_slice(&content);
                stream.dict.remove(b"Filter");
                stream.set_content(combined);
            }
            None => {
                let stream_id = self.inner.add_object(Stream::new(Dictionary::new(), content));
                self.inner
                    .get_dictionary_mut(page_id)?
                    .set("Contents", Object::Reference(stream_id));
            }
        }

        Ok(())
    }

    /// Move queued link annotations into each page's Annots array
    fn attach_annotations(&mut self) -> Result<()> {
        let pending: Vec<(usize, Vec<ObjectId>)> = self.pending_annotations.drain().collect();

        for (page, ids) in pending {
            let page_id = self.page_id(page)?;
            let page_dict = self.inner.get_dictionary_mut(page_id)?;

            let mut annots = page_dict
                .get(b"Annots")
                .and_then(Object::as_array)
                .cloned()
                .unwrap_or_default();
            annots.extend(ids.into_iter().map(Object::Reference));
            page_dict.set("Annots", Object::Array(annots));
        }

        Ok(())
    }

    /// Embed PNG bytes as an XObject on `page`
    ///
    /// Returns the resource name (e.g., "Im1") and pixel dimensions.
    fn embed_image(&mut self, data: &[u8], page: usize) -> Result<(String, u32, u32)> {
        let xobject = ImageXObject::from_png(data)
            .map_err(|e| PdfError::ImageError(format!("Failed to create image XObject: {e}")))?;
        let (width, height) = (xobject.width, xobject.height);
        let object_id = self.inner.add_object(xobject.to_pdf_stream());

        let resource_name = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;
        self.add_image_to_page_resources(page, &resource_name, object_id)?;

        Ok((resource_name, width, height))
    }

    /// Add image to a specific page's Resources dictionary
    fn add_image_to_page_resources(
        &mut self,
        page: usize,
        resource_name: &str,
        object_id: ObjectId,
    ) -> Result<()> {
        let page_id = self.page_id(page)?;
        let page_dict = self.inner.get_dictionary_mut(page_id)?;

        let mut resources = page_dict
            .get(b"Resources")
            .and_then(Object::as_dict)
            .cloned()
            .unwrap_or_default();
        let mut xobjects = resources
            .get(b"XObject")
            .and_then(Object::as_dict)
            .cloned()
            .unwrap_or_default();

        xobjects.set(resource_name.as_bytes(), Object::Reference(object_id));
        resources.set("XObject", Object::Dictionary(xobjects));
        page_dict.set("Resources", Object::Dictionary(resources));

        Ok(())
    }
}
