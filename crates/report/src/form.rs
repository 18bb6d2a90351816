//! Form model and the form-side collaborator traits

use crate::Result;
use serde::{Deserialize, Serialize};

/// Text fields of the report form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    SchoolName,
    EducationAdmin,
    ReportType,
    ExecutingGroup,
    TargetGroup,
    Beneficiaries,
    ExecutionDate,
    Duration,
    BarcodeLink,
    Goals,
    TeacherName,
    PrincipalName,
}

impl FormField {
    pub const ALL: [FormField; 12] = [
        FormField::SchoolName,
        FormField::EducationAdmin,
        FormField::ReportType,
        FormField::ExecutingGroup,
        FormField::TargetGroup,
        FormField::Beneficiaries,
        FormField::ExecutionDate,
        FormField::Duration,
        FormField::BarcodeLink,
        FormField::Goals,
        FormField::TeacherName,
        FormField::PrincipalName,
    ];

    /// The `name` attribute of the form control
    pub fn name(self) -> &'static str {
        match self {
            FormField::SchoolName => "schoolName",
            FormField::EducationAdmin => "educationAdmin",
            FormField::ReportType => "reportType",
            FormField::ExecutingGroup => "executingGroup",
            FormField::TargetGroup => "targetGroup",
            FormField::Beneficiaries => "beneficiaries",
            FormField::ExecutionDate => "executionDate",
            FormField::Duration => "duration",
            FormField::BarcodeLink => "barcodeLink",
            FormField::Goals => "goals",
            FormField::TeacherName => "teacherName",
            FormField::PrincipalName => "principalName",
        }
    }
}

/// Current values of the form's text fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    pub school_name: String,
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
}

impl FormInput {
    /// Build from a name -> value lookup; missing fields become empty
    pub fn from_lookup<L>(mut lookup: L) -> Self
    where
        L: FnMut(&str) -> Option<String>,
    {
        let mut input = FormInput::default();
        for field in FormField::ALL {
            if let Some(value) = lookup(field.name()) {
                *input.field_mut(field) = value;
            }
        }
        input
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::SchoolName => &self.school_name,
            FormField::EducationAdmin => &self.education_admin,
            FormField::ReportType => &self.report_type,
            FormField::ExecutingGroup => &self.executing_group,
            FormField::TargetGroup => &self.target_group,
            FormField::Beneficiaries => &self.beneficiaries,
            FormField::ExecutionDate => &self.execution_date,
            FormField::Duration => &self.duration,
            FormField::BarcodeLink => &self.barcode_link,
            FormField::Goals => &self.goals,
            FormField::TeacherName => &self.teacher_name,
            FormField::PrincipalName => &self.principal_name,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::SchoolName => &mut self.school_name,
            FormField::EducationAdmin => &mut self.education_admin,
            FormField::ReportType => &mut self.report_type,
            FormField::ExecutingGroup => &mut self.executing_group,
            FormField::TargetGroup => &mut self.target_group,
            FormField::Beneficiaries => &mut self.beneficiaries,
            FormField::ExecutionDate => &mut self.execution_date,
            FormField::Duration => &mut self.duration,
            FormField::BarcodeLink => &mut self.barcode_link,
            FormField::Goals => &mut self.goals,
            FormField::TeacherName => &mut self.teacher_name,
            FormField::PrincipalName => &mut self.principal_name,
        }
    }
}

/// A user-selected file that can be read asynchronously
#[allow(async_fn_in_trait)]
pub trait SelectedFile {
    /// File name as shown to the user
    fn name(&self) -> String;

    /// Declared MIME type; empty when unknown
    fn mime_type(&self) -> String;

    /// Read the full content
    async fn read_bytes(&self) -> Result<Vec<u8>>;
}

/// Files chosen in the two file inputs
#[derive(Debug, Clone)]
pub struct FileSelection<F> {
    pub barcode: Option<F>,
    pub evidence: Vec<F>,
}

impl<F> Default for FileSelection<F> {
    fn default() -> Self {
        Self {
            barcode: None,
            evidence: Vec::new(),
        }
    }
}

/// The input form
pub trait FormSource {
    type File: SelectedFile;

    /// Run the form's own validation; `false` aborts the export
    fn check_validity(&self) -> bool;

    /// Snapshot of the text fields
    fn read_input(&self) -> FormInput;

    /// Snapshot of the file inputs
    fn selected_files(&self) -> FileSelection<Self::File>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup() {
        let values: HashMap<&str, &str> = [("schoolName", "Alpha School"), ("goals", "Read more")]
            .into_iter()
            .collect();

        let input = FormInput::from_lookup(|name| values.get(name).map(|v| v.to_string()));

        assert_eq!(input.school_name, "Alpha School");
        assert_eq!(input.goals, "Read more");
        assert_eq!(input.report_type, "");
    }

    #[test]
    fn test_field_names_roundtrip_through_json() {
        let json = serde_json::json!({
            "schoolName": "Alpha School",
            "educationAdmin": "Riyadh",
            "executionDate": "2024-05-01",
            "barcodeLink": "https://example.com"
        });
        let input: FormInput = serde_json::from_value(json).unwrap();

        assert_eq!(input.get(FormField::SchoolName), "Alpha School");
        assert_eq!(input.get(FormField::EducationAdmin), "Riyadh");
        assert_eq!(input.get(FormField::BarcodeLink), "https://example.com");
        assert_eq!(input.get(FormField::Duration), "");

        let back = serde_json::to_value(&input).unwrap();
        for field in FormField::ALL {
            assert!(back.get(field.name()).is_some(), "missing {}", field.name());
        }
    }
}
