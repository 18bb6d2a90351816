//! Element ids of the host page

use report::{ImageSlot, TextSlot};
use serde::{Deserialize, Serialize};

/// Ids (and input names) the bindings look up once at construction
///
/// Any field left out of the JS object keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementIds {
    pub form: String,
    pub generate_button: String,
    /// Region handed to the rasterizer
    pub page: String,
    pub frame: String,
    pub empty_state: String,
    pub download_link: String,
    pub barcode_image: String,
    pub barcode_empty: String,
    pub evidence_images: [String; 4],
    /// `name` of the barcode file input inside the form
    pub barcode_input: String,
    /// `name` of the evidence file input inside the form
    pub evidence_input: String,
    /// Template nodes receiving text
    pub text: TextIds,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            form: "infoForm".to_string(),
            generate_button: "btnGenerate".to_string(),
            page: "pdfPage".to_string(),
            frame: "pdfFrame".to_string(),
            empty_state: "emptyState".to_string(),
            download_link: "downloadLink".to_string(),
            barcode_image: "barcodeImg".to_string(),
            barcode_empty: "barcodeEmpty".to_string(),
            evidence_images: ["evImg1", "evImg2", "evImg3", "evImg4"].map(String::from),
            barcode_input: "barcodeImage".to_string(),
            evidence_input: "evidenceImages".to_string(),
            text: TextIds::default(),
        }
    }
}

impl ElementIds {
    pub fn image(&self, slot: ImageSlot) -> &str {
        match slot {
            ImageSlot::Barcode => &self.barcode_image,
            ImageSlot::Evidence1 => &self.evidence_images[0],
            ImageSlot::Evidence2 => &self.evidence_images[1],
            ImageSlot::Evidence3 => &self.evidence_images[2],
            ImageSlot::Evidence4 => &self.evidence_images[3],
        }
    }

    pub fn text(&self, slot: TextSlot) -> &str {
        self.text.get(slot)
    }
}

/// Ids of the template's text nodes, one per `TextSlot`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextIds {
    pub school_name: String,
    pub education_admin_header: String,
    pub education_admin: String,
    pub report_type: String,
    pub executing_group: String,
    pub target_group: String,
    pub beneficiaries: String,
    pub execution_date: String,
    pub duration: String,
    pub barcode_link: String,
    pub goals: String,
    pub teacher_name: String,
    pub principal_name: String,
    pub generated_at: String,
    pub reference: String,
}

impl Default for TextIds {
    fn default() -> Self {
        Self {
            school_name: "pdfSchoolName".to_string(),
            education_admin_header: "pdfEducationAdminHeader".to_string(),
            education_admin: "pdfEducationAdmin".to_string(),
            report_type: "pdfReportType".to_string(),
            executing_group: "pdfExecutingGroup".to_string(),
            target_group: "pdfTargetGroup".to_string(),
            beneficiaries: "pdfBeneficiaries".to_string(),
            execution_date: "pdfExecutionDate".to_string(),
            duration: "pdfDuration".to_string(),
            barcode_link: "pdfBarcodeLink".to_string(),
            goals: "pdfGoals".to_string(),
            teacher_name: "pdfTeacherName".to_string(),
            principal_name: "pdfPrincipalName".to_string(),
            generated_at: "pdfGeneratedAt".to_string(),
            reference: "pdfRef".to_string(),
        }
    }
}

impl TextIds {
    /// Id of the node showing `slot`
    pub fn get(&self, slot: TextSlot) -> &str {
        match slot {
            TextSlot::SchoolName => &self.school_name,
            TextSlot::EducationAdminHeader => &self.education_admin_header,
            TextSlot::EducationAdmin => &self.education_admin,
            TextSlot::ReportType => &self.report_type,
            TextSlot::ExecutingGroup => &self.executing_group,
            TextSlot::TargetGroup => &self.target_group,
            TextSlot::Beneficiaries => &self.beneficiaries,
            TextSlot::ExecutionDate => &self.execution_date,
            TextSlot::Duration => &self.duration,
            TextSlot::BarcodeLink => &self.barcode_link,
            TextSlot::Goals => &self.goals,
            TextSlot::TeacherName => &self.teacher_name,
            TextSlot::PrincipalName => &self.principal_name,
            TextSlot::GeneratedAt => &self.generated_at,
            TextSlot::Reference => &self.reference,
        }
    }
}
