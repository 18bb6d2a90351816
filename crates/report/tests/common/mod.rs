//! Test doubles for driving the exporter without a browser

#![allow(dead_code)]

use report::{
    Artifact, Bitmap, ExportConfig, ExportContext, ExportError, ExportView, FileSelection,
    FormInput, FormSource, MemoryArtifactStore, MemoryTemplate, RasterOptions, Rasterizer,
    ReportExporter, Result, SelectedFile,
};
use std::cell::RefCell;

/// A selected file; `bytes == None` fails to read
#[derive(Debug, Clone)]
pub struct TestFile {
    pub name: String,
    pub mime: String,
    pub bytes: Option<Vec<u8>>,
}

impl TestFile {
    pub fn png(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mime: "image/png".to_string(),
            bytes: Some(create_test_png(4, 4)),
        }
    }

    pub fn unreadable(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mime: "image/png".to_string(),
            bytes: None,
        }
    }
}

impl SelectedFile for TestFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime.clone()
    }

    async fn read_bytes(&self) -> Result<Vec<u8>> {
        self.bytes
            .clone()
            .ok_or_else(|| ExportError::FileRead(self.name.clone()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestForm {
    pub invalid: bool,
    pub input: FormInput,
    pub files: FileSelection<TestFile>,
}

impl FormSource for TestForm {
    type File = TestFile;

    fn check_validity(&self) -> bool {
        !self.invalid
    }

    fn read_input(&self) -> FormInput {
        self.input.clone()
    }

    fn selected_files(&self) -> FileSelection<TestFile> {
        self.files.clone()
    }
}

/// Returns a solid bitmap of a fixed size and records the options it got
pub struct FixedRasterizer {
    pub width: u32,
    pub height: u32,
    pub calls: RefCell<Vec<RasterOptions>>,
    /// 1-based call number that fails instead
    pub fail_on_call: Option<usize>,
}

impl FixedRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: RefCell::new(Vec::new()),
            fail_on_call: None,
        }
    }
}

impl Rasterizer for FixedRasterizer {
    async fn rasterize(&self, options: &RasterOptions) -> Result<Bitmap> {
        let call = {
            let mut calls = self.calls.borrow_mut();
            calls.push(options.clone());
            calls.len()
        };
        if self.fail_on_call == Some(call) {
            return Err(ExportError::Raster("canvas is tainted".to_string()));
        }
        Bitmap::from_png(create_test_png(self.width, self.height))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Busy(bool),
    Artifact { handle: String, filename: String },
    Empty,
    Failure(String),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn artifacts(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ViewEvent::Artifact { .. }))
            .count()
    }

    pub fn failures(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Failure(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ExportView<String> for RecordingView {
    fn set_busy(&mut self, busy: bool) {
        self.events.push(ViewEvent::Busy(busy));
    }

    fn show_artifact(&mut self, artifact: &Artifact<String>) {
        self.events.push(ViewEvent::Artifact {
            handle: artifact.handle.clone(),
            filename: artifact.filename.clone(),
        });
    }

    fn show_empty(&mut self) {
        self.events.push(ViewEvent::Empty);
    }

    fn notify_failure(&mut self, error: &ExportError) {
        self.events.push(ViewEvent::Failure(error.to_string()));
    }
}

pub type TestExporter =
    ReportExporter<TestForm, MemoryTemplate, FixedRasterizer, MemoryArtifactStore, RecordingView>;

pub fn exporter(form: TestForm, config: ExportConfig) -> TestExporter {
    exporter_with_bitmap(form, config, 794, 1123)
}

pub fn exporter_with_bitmap(
    form: TestForm,
    config: ExportConfig,
    width: u32,
    height: u32,
) -> TestExporter {
    let ctx = ExportContext {
        form,
        template: MemoryTemplate::default(),
        rasterizer: FixedRasterizer::new(width, height),
        store: MemoryArtifactStore::new(),
        view: RecordingView::default(),
    };
    ReportExporter::new(ctx, config)
        .with_suffix(|| "A1B2C3".to_string())
        .with_clock(|| {
            chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
                .and_then(|d| d.and_hms_opt(15, 5, 0))
                .unwrap_or_default()
        })
}

/// Create a solid PNG of the given size
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    use image::{ImageBuffer, Rgb};

    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(width, height, Rgb([11, 18, 32]));
    let mut buffer = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut buffer),
        image::ImageFormat::Png,
    )
    .expect("Failed to create PNG");
    buffer
}

/// Bytes of the exporter's live artifact
pub fn current_pdf(exporter: &TestExporter) -> Vec<u8> {
    let handle = &exporter.current().expect("no current artifact").handle;
    exporter
        .context()
        .store
        .resolve(handle)
        .expect("current handle does not resolve")
        .to_vec()
}
