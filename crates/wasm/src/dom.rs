//! DOM-backed form, template and view

use crate::ids::ElementIds;
use crate::js_error;
use futures_util::future::join_all;
use report::{
    Artifact, ExportError, ExportView, FileSelection, FormInput, FormSource, ImageSlot,
    PreviewTemplate, SelectedFile, TextSlot,
};
use std::collections::{HashMap, HashSet};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, File, FormData, HtmlAnchorElement, HtmlButtonElement, HtmlElement,
    HtmlFormElement, HtmlIFrameElement, HtmlImageElement, HtmlInputElement, Window,
};

const HIDDEN: &str = "is-hidden";
const DISABLED: &str = "is-disabled";

const IDLE_LABEL: &str = "إنشاء PDF";
const BUSY_LABEL: &str = "جاري الإنشاء...";
const FAILURE_MESSAGE: &str = "حدث خطأ أثناء إنشاء PDF. افتح Console للمزيد.";

/// Every element the exporter touches, resolved once
pub struct DomBindings {
    pub form: DomForm,
    pub template: DomTemplate,
    pub page: HtmlElement,
    pub view: DomView,
}

impl DomBindings {
    pub fn resolve(ids: &ElementIds) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let form: HtmlFormElement = element(&document, &ids.form)?;
        let barcode_input = named_input(&form, &ids.barcode_input)?;
        let evidence_input = named_input(&form, &ids.evidence_input)?;

        let mut texts = HashMap::new();
        for slot in TextSlot::ALL {
            texts.insert(slot, element::<Element>(&document, ids.text(slot))?);
        }

        let mut images = HashMap::new();
        for slot in [
            ImageSlot::Barcode,
            ImageSlot::Evidence1,
            ImageSlot::Evidence2,
            ImageSlot::Evidence3,
            ImageSlot::Evidence4,
        ] {
            images.insert(slot, element::<HtmlImageElement>(&document, ids.image(slot))?);
        }

        let page: HtmlElement = element(&document, &ids.page)?;

        Ok(Self {
            form: DomForm {
                form,
                barcode_input,
                evidence_input,
            },
            template: DomTemplate {
                page: page.clone(),
                texts,
                images,
                barcode_empty: element(&document, &ids.barcode_empty)?,
                populated: HashSet::new(),
            },
            page,
            view: DomView {
                window,
                button: element(&document, &ids.generate_button)?,
                frame: element(&document, &ids.frame)?,
                empty_state: element(&document, &ids.empty_state)?,
                download: element(&document, &ids.download_link)?,
            },
        })
    }
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has an unexpected type")))
}

fn named_input(form: &HtmlFormElement, name: &str) -> Result<HtmlInputElement, JsValue> {
    form.query_selector(&format!("input[name=\"{name}\"]"))?
        .ok_or_else(|| JsValue::from_str(&format!("missing input {name}")))?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str(&format!("{name} is not an input")))
}

fn set_hidden(element: &Element, hidden: bool) {
    if let Err(e) = element.class_list().toggle_with_force(HIDDEN, hidden) {
        log::warn!("failed to toggle {HIDDEN}: {}", js_error(&e));
    }
}

/// The `<form>` and its two file inputs
pub struct DomForm {
    form: HtmlFormElement,
    barcode_input: HtmlInputElement,
    evidence_input: HtmlInputElement,
}

fn files_of(input: &HtmlInputElement) -> Vec<DomFile> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(DomFile)
        .collect()
}

impl FormSource for DomForm {
    type File = DomFile;

    fn check_validity(&self) -> bool {
        self.form.report_validity()
    }

    fn read_input(&self) -> FormInput {
        match FormData::new_with_form(&self.form) {
            Ok(data) => FormInput::from_lookup(|name| data.get(name).as_string()),
            Err(e) => {
                log::warn!("could not read form data: {}", js_error(&e));
                FormInput::default()
            }
        }
    }

    fn selected_files(&self) -> FileSelection<DomFile> {
        FileSelection {
            barcode: files_of(&self.barcode_input).into_iter().next(),
            evidence: files_of(&self.evidence_input),
        }
    }
}

/// A `File` from a file input
#[derive(Debug, Clone)]
pub struct DomFile(File);

impl SelectedFile for DomFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }

    async fn read_bytes(&self) -> report::Result<Vec<u8>> {
        let buffer = JsFuture::from(self.0.array_buffer()).await.map_err(|e| {
            log::warn!("reading {} failed: {}", self.0.name(), js_error(&e));
            ExportError::FileRead(self.0.name())
        })?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}

/// The hidden preview page
pub struct DomTemplate {
    page: HtmlElement,
    texts: HashMap<TextSlot, Element>,
    images: HashMap<ImageSlot, HtmlImageElement>,
    barcode_empty: Element,
    populated: HashSet<ImageSlot>,
}

impl DomTemplate {
    fn image(&self, slot: ImageSlot) -> report::Result<&HtmlImageElement> {
        self.images
            .get(&slot)
            .ok_or_else(|| ExportError::Template(format!("no element for {slot:?}")))
    }
}

impl PreviewTemplate for DomTemplate {
    fn set_text(&mut self, slot: TextSlot, text: &str) -> report::Result<()> {
        let element = self
            .texts
            .get(&slot)
            .ok_or_else(|| ExportError::Template(format!("no element for {slot:?}")))?;
        element.set_text_content(Some(text));
        Ok(())
    }

    fn set_image(&mut self, slot: ImageSlot, source: Option<&str>) -> report::Result<()> {
        let img = self.image(slot)?.clone();
        match source {
            Some(src) if !src.is_empty() => {
                img.set_src(src);
                set_hidden(&img, false);
                self.populated.insert(slot);
            }
            _ => {
                img.set_src("");
                set_hidden(&img, true);
                self.populated.remove(&slot);
            }
        }
        Ok(())
    }

    fn set_barcode_placeholder(&mut self, visible: bool) -> report::Result<()> {
        set_hidden(&self.barcode_empty, !visible);
        Ok(())
    }

    fn scroll_size(&self) -> (u32, u32) {
        (
            self.page.scroll_width().max(0) as u32,
            self.page.scroll_height().max(0) as u32,
        )
    }

    async fn images_loaded(&self) -> report::Result<()> {
        let pending = self
            .populated
            .iter()
            .filter_map(|slot| self.images.get(slot).map(|img| (*slot, img.decode())))
            .map(|(slot, promise)| async move { (slot, JsFuture::from(promise).await) });

        // Decode failures are not fatal
        for (slot, result) in join_all(pending).await {
            if let Err(e) = result {
                log::warn!("{slot:?} failed to decode: {}", js_error(&e));
            }
        }
        Ok(())
    }
}

/// Trigger button, preview frame and download link
pub struct DomView {
    window: Window,
    button: HtmlButtonElement,
    frame: HtmlIFrameElement,
    empty_state: Element,
    download: HtmlAnchorElement,
}

impl DomView {
    pub fn button(&self) -> &HtmlButtonElement {
        &self.button
    }

    fn set_download_enabled(&self, enabled: bool) {
        if let Err(e) = self
            .download
            .class_list()
            .toggle_with_force(DISABLED, !enabled)
        {
            log::warn!("failed to toggle {DISABLED}: {}", js_error(&e));
        }
    }
}

impl ExportView<String> for DomView {
    fn set_busy(&mut self, busy: bool) {
        self.button.set_disabled(busy);
        self.button
            .set_text_content(Some(if busy { BUSY_LABEL } else { IDLE_LABEL }));
    }

    fn show_artifact(&mut self, artifact: &Artifact<String>) {
        set_hidden(&self.empty_state, true);
        set_hidden(&self.frame, false);
        self.frame.set_src(&artifact.handle);
        self.download.set_href(&artifact.handle);
        self.download.set_download(&artifact.filename);
        self.set_download_enabled(true);
    }

    fn show_empty(&mut self) {
        set_hidden(&self.frame, true);
        set_hidden(&self.empty_state, false);
        self.download.set_href("#");
        self.set_download_enabled(false);
    }

    fn notify_failure(&mut self, error: &ExportError) {
        web_sys::console::error_1(&JsValue::from_str(&error.to_string()));
        if let Err(e) = self.window.alert_with_message(FAILURE_MESSAGE) {
            log::warn!("alert failed: {}", js_error(&e));
        }
    }
}
