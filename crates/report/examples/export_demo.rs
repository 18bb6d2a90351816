//! Run the export pipeline without a browser and write the PDF to disk
//!
//! ```sh
//! cargo run -p report --example export_demo -- output/report.pdf
//! ```

use report::{
    Bitmap, ExportConfig, ExportContext, ExportError, ExportOutcome, ExportView, FileSelection,
    FormInput, FormSource, MemoryArtifactStore, MemoryFile, MemoryTemplate, RasterOptions,
    Rasterizer, ReportExporter,
};

struct DemoForm;

impl FormSource for DemoForm {
    type File = MemoryFile;

    fn check_validity(&self) -> bool {
        true
    }

    fn read_input(&self) -> FormInput {
        FormInput {
            school_name: "ثانوية النور".to_string(),
            education_admin: "الرياض".to_string(),
            report_type: "برنامج".to_string(),
            executing_group: "فريق التوعية الصحية".to_string(),
            target_group: "طالبات الصف الثالث ثانوي".to_string(),
            beneficiaries: "120".to_string(),
            execution_date: "1447/01/01".to_string(),
            duration: "يوم واحد".to_string(),
            barcode_link: "https://example.com/qrcode".to_string(),
            ..FormInput::default()
        }
    }

    fn selected_files(&self) -> FileSelection<MemoryFile> {
        FileSelection::default()
    }
}

/// Paints the template background color at the template's size
struct SolidRasterizer;

impl Rasterizer for SolidRasterizer {
    async fn rasterize(&self, options: &RasterOptions) -> report::Result<Bitmap> {
        let width = options.window_width.unwrap_or(794);
        let height = options.window_height.unwrap_or(1123);
        let scale = options.scale;

        let img = image::RgbImage::from_pixel(
            (width as f64 * scale) as u32,
            (height as f64 * scale) as u32,
            image::Rgb([11, 18, 32]),
        );
        let mut png = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| ExportError::Raster(e.to_string()))?;
        Bitmap::from_png(png)
    }
}

struct StdoutView;

impl ExportView<String> for StdoutView {
    fn set_busy(&mut self, busy: bool) {
        println!("busy: {busy}");
    }

    fn show_artifact(&mut self, artifact: &report::Artifact<String>) {
        println!("preview {} as {}", artifact.handle, artifact.filename);
    }

    fn show_empty(&mut self) {
        println!("no report yet");
    }

    fn notify_failure(&mut self, error: &ExportError) {
        eprintln!("export failed: {error}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "output/report.pdf".to_string());

    let config = ExportConfig::from_json(r#"{ "barcodeFromLink": true }"#)?;
    let ctx = ExportContext {
        form: DemoForm,
        template: MemoryTemplate::default(),
        rasterizer: SolidRasterizer,
        store: MemoryArtifactStore::new(),
        view: StdoutView,
    };
    let mut exporter = ReportExporter::new(ctx, config);

    match exporter.run().await {
        ExportOutcome::Exported {
            filename,
            reference,
            size,
        } => {
            let handle = exporter.current().map(|a| a.handle.clone()).unwrap_or_default();
            let bytes = exporter
                .context()
                .store
                .resolve(&handle)
                .ok_or("artifact handle did not resolve")?;

            if let Some(parent) = std::path::Path::new(&output).parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, bytes)?;
            println!("{filename} ({size} bytes, ref {reference}) -> {output}");
        }
        other => println!("{other:?}"),
    }

    Ok(())
}
