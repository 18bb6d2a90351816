//! WASM bindings for the report exporter
//!
//! This crate wires the `report` pipeline to the browser:
//! - The input form, hidden preview page and preview/download controls
//! - `html2canvas` as the rasterizer
//! - `blob:` object URLs as artifact handles
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { ReportExporter } from 'report-wasm';
//!
//! await init();
//!
//! // Default element ids, default configuration
//! const exporter = new ReportExporter();
//!
//! // Or override some of them
//! // const exporter = new ReportExporter({ page: 'reportPage' }, { pageFit: 'stretch' });
//!
//! exporter.bindTrigger();          // wire the generate button
//! const outcome = await exporter.generate();
//! ```

mod canvas;
mod dom;
mod ids;
mod store;

pub use canvas::Html2Canvas;
pub use dom::{DomBindings, DomFile, DomForm, DomTemplate, DomView};
pub use ids::{ElementIds, TextIds};
pub use store::BlobUrlStore;

use chrono::{NaiveDate, NaiveDateTime};
use report::{Artifact, ExportConfig, ExportContext, ExportOutcome, ReferenceCode};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

type DomExporter = report::ReportExporter<DomForm, DomTemplate, Html2Canvas, BlobUrlStore, DomView>;

static LOGGER: ConsoleLogger = ConsoleLogger;

// Initialize panic hook and logging for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

/// Forwards `log` records to the browser console
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            log::Level::Info => web_sys::console::info_1(&line),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Readable message from a thrown JS value
pub(crate) fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Local wall-clock time from `Date` (chrono's local clock is unavailable here)
fn browser_now() -> NaiveDateTime {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .and_then(|date| date.and_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds()))
    .unwrap_or_default()
}

fn from_js_or_default<T>(value: JsValue) -> Result<T, JsValue>
where
    T: serde::de::DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        Ok(serde_wasm_bindgen::from_value(value)?)
    }
}

/// Copy of the current artifact, readable while an export holds the exporter
#[derive(Debug, Clone, Default)]
struct ShownArtifact(Rc<RefCell<Option<Artifact<String>>>>);

impl ShownArtifact {
    fn set(&self, artifact: Option<&Artifact<String>>) {
        *self.0.borrow_mut() = artifact.cloned();
    }

    fn url(&self) -> Option<String> {
        self.0.borrow().as_ref().map(|a| a.handle.clone())
    }

    fn filename(&self) -> Option<String> {
        self.0.borrow().as_ref().map(|a| a.filename.clone())
    }
}

/// Report exporter bound to the page
#[wasm_bindgen(js_name = ReportExporter)]
pub struct ReportExporterHandle {
    inner: Rc<RefCell<DomExporter>>,
    shown: ShownArtifact,
}

#[wasm_bindgen(js_class = ReportExporter)]
impl ReportExporterHandle {
    /// Resolve the page elements and reset the preview
    ///
    /// @param ids - Optional element id overrides
    /// @param config - Optional export configuration object
    #[wasm_bindgen(constructor)]
    pub fn new(ids: JsValue, config: JsValue) -> Result<ReportExporterHandle, JsValue> {
        let ids: ElementIds = from_js_or_default(ids)?;
        let config: ExportConfig = from_js_or_default(config)?;
        Self::build(&ids, config)
    }

    /// Create an exporter from a JSON configuration with default element ids
    ///
    /// @param json - Export configuration JSON
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<ReportExporterHandle, JsValue> {
        let config = ExportConfig::from_json(json).map_err(to_js_error)?;
        Self::build(&ElementIds::default(), config)
    }

    fn build(ids: &ElementIds, config: ExportConfig) -> Result<ReportExporterHandle, JsValue> {
        let bindings = DomBindings::resolve(ids)?;
        let ctx = ExportContext {
            form: bindings.form,
            template: bindings.template,
            rasterizer: Html2Canvas::new(bindings.page),
            store: BlobUrlStore,
            view: bindings.view,
        };
        let exporter = report::ReportExporter::new(ctx, config).with_clock(browser_now);

        Ok(ReportExporterHandle {
            inner: Rc::new(RefCell::new(exporter)),
            shown: ShownArtifact::default(),
        })
    }

    /// Run one export
    ///
    /// Rejects when an export is already running.
    ///
    /// @returns Promise of `{ status: "exported" | "skipped" | "failed", ... }`
    pub fn generate(&self) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        let shown = self.shown.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            let outcome = run_exclusive(&inner, &shown)
                .await
                .ok_or_else(|| JsValue::from_str("an export is already running"))?;
            Ok(serde_wasm_bindgen::to_value(&outcome)?)
        })
    }

    /// Run an export whenever the generate button is clicked
    #[wasm_bindgen(js_name = bindTrigger)]
    pub fn bind_trigger(&self) -> Result<(), JsValue> {
        let inner = Rc::clone(&self.inner);
        let shown = self.shown.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            let inner = Rc::clone(&inner);
            let shown = shown.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if run_exclusive(&inner, &shown).await.is_none() {
                    log::warn!("export already running, click ignored");
                }
            });
        });

        let button = self
            .inner
            .try_borrow()
            .map_err(|_| JsValue::from_str("an export is already running"))?
            .context()
            .view
            .button()
            .clone();
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        Ok(())
    }

    /// Revoke the current PDF and show the empty preview
    pub fn clear(&self) -> Result<(), JsValue> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("an export is already running"))?
            .clear();
        self.shown.set(None);
        Ok(())
    }

    /// Object URL of the current PDF
    #[wasm_bindgen(getter, js_name = currentUrl)]
    pub fn current_url(&self) -> Option<String> {
        self.shown.url()
    }

    /// Download filename of the current PDF
    #[wasm_bindgen(getter, js_name = currentFilename)]
    pub fn current_filename(&self) -> Option<String> {
        self.shown.filename()
    }
}

/// Run one export unless another holds the exporter
#[allow(clippy::await_holding_refcell_ref)]
async fn run_exclusive(
    inner: &RefCell<DomExporter>,
    shown: &ShownArtifact,
) -> Option<ExportOutcome> {
    let mut exporter = inner.try_borrow_mut().ok()?;
    let outcome = exporter.run().await;
    shown.set(exporter.current());
    Some(outcome)
}

/// Text helpers exposed for the host page
#[wasm_bindgen]
pub struct ReportFormat;

#[wasm_bindgen]
impl ReportFormat {
    /// Build a reference code with a fresh random suffix
    ///
    /// @param schoolName - School name
    /// @param executionDate - Execution date as entered
    /// @returns Reference code (e.g., "20240501-Alpha School-A1B2C3")
    #[wasm_bindgen(js_name = referenceCode)]
    pub fn reference_code(school_name: &str, execution_date: &str) -> String {
        ReferenceCode::generate(school_name, execution_date).to_string()
    }

    /// Download filename for a school
    ///
    /// @param schoolName - School name
    /// @returns Filename ending in ".pdf"
    pub fn filename(school_name: &str) -> String {
        let text = report::TextConfig::default();
        report::artifact_filename(school_name, &text.filename_label, &text.filename_fallback)
    }
}
