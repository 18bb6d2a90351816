//! The export pipeline and ownership of the live artifact

use crate::artifact::{Artifact, ArtifactStore};
use crate::compose::{compose_pdf, web_address};
use crate::config::ExportConfig;
use crate::data_url;
use crate::form::FormSource;
use crate::naming::artifact_filename;
use crate::populate::{apply_images, read_image_sources, text_values, write_text, DerivedText};
use crate::qr::generate_qr_png;
use crate::raster::Rasterizer;
use crate::reference::{random_suffix, ReferenceCode};
use crate::template::PreviewTemplate;
use crate::view::ExportView;
use crate::Result;
use chrono::NaiveDateTime;
use report_text::LocaleFormatter;
use serde::Serialize;

/// The collaborators an exporter drives
pub struct ExportContext<F, T, R, S, V> {
    pub form: F,
    pub template: T,
    pub rasterizer: R,
    pub store: S,
    pub view: V,
}

/// Result of one trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ExportOutcome {
    /// The form failed validation; nothing changed
    Skipped,
    Exported {
        filename: String,
        reference: String,
        size: usize,
    },
    /// The export failed and the user was notified
    Failed { message: String },
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Runs exports and keeps exactly one live artifact
pub struct ReportExporter<F, T, R, S: ArtifactStore, V> {
    ctx: ExportContext<F, T, R, S, V>,
    config: ExportConfig,
    current: Option<Artifact<S::Handle>>,
    clock: fn() -> NaiveDateTime,
    suffix: fn() -> String,
}

impl<F, T, R, S, V> ReportExporter<F, T, R, S, V>
where
    F: FormSource,
    T: PreviewTemplate,
    R: Rasterizer,
    S: ArtifactStore,
    V: ExportView<S::Handle>,
{
    /// Create an exporter and put the view into its empty state
    pub fn new(mut ctx: ExportContext<F, T, R, S, V>, config: ExportConfig) -> Self {
        ctx.view.show_empty();
        Self {
            ctx,
            config,
            current: None,
            clock: local_now,
            suffix: random_suffix,
        }
    }

    /// Replace the wall clock used for the generation timestamp
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the reference suffix generator
    pub fn with_suffix(mut self, suffix: fn() -> String) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// The live artifact, if any
    pub fn current(&self) -> Option<&Artifact<S::Handle>> {
        self.current.as_ref()
    }

    pub fn context(&self) -> &ExportContext<F, T, R, S, V> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut ExportContext<F, T, R, S, V> {
        &mut self.ctx
    }

    /// Handle a user trigger
    ///
    /// Marks the view busy for the duration, reports failures through the
    /// view and always restores the trigger.
    pub async fn run(&mut self) -> ExportOutcome {
        self.ctx.view.set_busy(true);

        let outcome = match self.export().await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("report export failed: {e}");
                self.ctx.view.notify_failure(&e);
                ExportOutcome::Failed {
                    message: e.to_string(),
                }
            }
        };

        self.ctx.view.set_busy(false);
        outcome
    }

    /// Run the pipeline once
    ///
    /// On error the previous artifact stays current and the view is not
    /// touched.
    pub async fn export(&mut self) -> Result<ExportOutcome> {
        if !self.ctx.form.check_validity() {
            log::debug!("form failed validation, export skipped");
            return Ok(ExportOutcome::Skipped);
        }

        let input = self.ctx.form.read_input();
        let files = self.ctx.form.selected_files();

        let reference =
            ReferenceCode::build(&input.school_name, &input.execution_date, &(self.suffix)());
        let formatter = LocaleFormatter::new(self.config.text.locale);
        let derived = DerivedText {
            generated_at: formatter.timestamp(&(self.clock)()),
            reference: reference.to_string(),
        };

        let values = text_values(&input, &derived, &self.config.text);
        write_text(&mut self.ctx.template, &values)?;

        let mut sources = read_image_sources(&files).await?;
        if sources.barcode.is_none() && self.config.barcode_from_link {
            let link = input.barcode_link.trim();
            if !link.is_empty() {
                log::debug!("no barcode image selected, rendering link as QR code");
                match generate_qr_png(link) {
                    Ok(png) => sources.barcode = Some(data_url::encode("image/png", &png)),
                    Err(e) => log::warn!("link not rendered as QR code, keeping placeholder: {e}"),
                }
            }
        }
        apply_images(&mut self.ctx.template, &sources)?;
        self.ctx.template.images_loaded().await?;

        let options = self
            .config
            .raster
            .options(Some(self.ctx.template.scroll_size()));
        let bitmap = self.ctx.rasterizer.rasterize(&options).await?;
        log::debug!("rasterized template to {}x{}", bitmap.width, bitmap.height);

        let link = self
            .config
            .link_overlay
            .and_then(|rect| web_address(&input.barcode_link).map(|uri| (rect, uri)));
        let pdf = compose_pdf(
            &bitmap,
            &self.config.page,
            self.config.page_fit,
            link.as_ref().map(|(rect, uri)| (*rect, uri.as_str())),
        )?;

        let filename = artifact_filename(
            &input.school_name,
            &self.config.text.filename_label,
            &self.config.text.filename_fallback,
        );
        let size = pdf.len();
        let handle = self.ctx.store.publish(pdf)?;

        let artifact = Artifact {
            handle,
            filename: filename.clone(),
            reference: reference.to_string(),
            size,
        };
        self.replace(artifact);
        if let Some(current) = &self.current {
            self.ctx.view.show_artifact(current);
        }

        log::info!("exported {filename} ({size} bytes, reference {reference})");
        Ok(ExportOutcome::Exported {
            filename,
            reference: reference.to_string(),
            size,
        })
    }

    /// Make `artifact` current, revoking the previous handle first
    pub fn replace(&mut self, artifact: Artifact<S::Handle>) {
        if let Some(old) = self.current.take() {
            log::debug!("revoking {:?}", old.handle);
            self.ctx.store.revoke(&old.handle);
        }
        self.current = Some(artifact);
    }

    /// Revoke the live artifact and return the view to its empty state
    pub fn clear(&mut self) {
        if let Some(old) = self.current.take() {
            self.ctx.store.revoke(&old.handle);
        }
        self.ctx.view.show_empty();
    }
}
