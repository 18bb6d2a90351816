//! Writing form values and images into the preview template

use crate::config::TextConfig;
use crate::data_url::file_to_data_url;
use crate::form::{FileSelection, FormField, FormInput, SelectedFile};
use crate::template::{ImageSlot, PreviewTemplate, TextSlot, EVIDENCE_SLOTS};
use crate::Result;
use futures_util::future::{try_join, try_join_all};
use report_text::{safe_text, LocaleFormatter};

/// Evidence photos used per report
pub const MAX_EVIDENCE: usize = EVIDENCE_SLOTS.len();

/// Values computed per export rather than read from the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedText {
    pub generated_at: String,
    pub reference: String,
}

/// Text for every slot, with the placeholder substituted for empty values
pub fn text_values(
    input: &FormInput,
    derived: &DerivedText,
    config: &TextConfig,
) -> Vec<(TextSlot, String)> {
    let formatter = LocaleFormatter::new(config.locale);

    TextSlot::ALL
        .iter()
        .map(|&slot| {
            let raw = match slot.source() {
                Some(FormField::ExecutionDate) if config.localize_execution_date => {
                    formatter.date_or_raw(input.execution_date.trim())
                }
                Some(field) => input.get(field).to_string(),
                None if slot == TextSlot::GeneratedAt => derived.generated_at.clone(),
                None => derived.reference.clone(),
            };
            (slot, safe_text(&raw, config.placeholder_text()))
        })
        .collect()
}

pub fn write_text<T: PreviewTemplate>(
    template: &mut T,
    values: &[(TextSlot, String)],
) -> Result<()> {
    for (slot, text) in values {
        template.set_text(*slot, text)?;
    }
    Ok(())
}

/// Embeddable sources for the image slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSources {
    pub barcode: Option<String>,
    /// At most `MAX_EVIDENCE`, in selection order
    pub evidence: Vec<String>,
}

/// Read the selected files concurrently into `data:` URIs
///
/// Evidence files beyond the fourth are not read. Any failed read fails
/// the whole batch.
pub async fn read_image_sources<F: SelectedFile>(
    files: &FileSelection<F>,
) -> Result<ImageSources> {
    let barcode = async {
        match &files.barcode {
            Some(file) => file_to_data_url(file).await.map(Some),
            None => Ok(None),
        }
    };
    let evidence = try_join_all(
        files
            .evidence
            .iter()
            .take(MAX_EVIDENCE)
            .map(file_to_data_url),
    );

    let (barcode, evidence) = try_join(barcode, evidence).await?;
    Ok(ImageSources { barcode, evidence })
}

/// Place the sources into the template
///
/// The barcode placeholder is shown when there is no barcode source. All
/// evidence slots are cleared first so a shorter selection hides the rest.
pub fn apply_images<T: PreviewTemplate>(template: &mut T, sources: &ImageSources) -> Result<()> {
    match &sources.barcode {
        Some(src) => {
            template.set_image(ImageSlot::Barcode, Some(src))?;
            template.set_barcode_placeholder(false)?;
        }
        None => {
            template.set_image(ImageSlot::Barcode, None)?;
            template.set_barcode_placeholder(true)?;
        }
    }

    for slot in EVIDENCE_SLOTS {
        template.set_image(slot, None)?;
    }
    for (slot, src) in EVIDENCE_SLOTS.iter().zip(&sources.evidence) {
        template.set_image(*slot, Some(src))?;
    }

    Ok(())
}
