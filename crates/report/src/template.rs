//! Preview template slots and the template collaborator trait

use crate::form::FormField;
use crate::Result;

/// Text nodes of the preview template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    SchoolName,
    /// Region shown in the page header
    EducationAdminHeader,
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
    GeneratedAt,
    Reference,
}

impl TextSlot {
    pub const ALL: [TextSlot; 15] = [
        TextSlot::SchoolName,
        TextSlot::EducationAdminHeader,
        TextSlot::EducationAdmin,
        TextSlot::ReportType,
        TextSlot::ExecutingGroup,
        TextSlot::TargetGroup,
        TextSlot::Beneficiaries,
        TextSlot::ExecutionDate,
        TextSlot::Duration,
        TextSlot::BarcodeLink,
        TextSlot::Goals,
        TextSlot::TeacherName,
        TextSlot::PrincipalName,
        TextSlot::GeneratedAt,
        TextSlot::Reference,
    ];

    /// Form field feeding this slot; `None` for derived slots
    pub fn source(self) -> Option<FormField> {
        match self {
            TextSlot::SchoolName => Some(FormField::SchoolName),
            TextSlot::EducationAdminHeader | TextSlot::EducationAdmin => {
                Some(FormField::EducationAdmin)
            }
            TextSlot::ReportType => Some(FormField::ReportType),
            TextSlot::ExecutingGroup => Some(FormField::ExecutingGroup),
            TextSlot::TargetGroup => Some(FormField::TargetGroup),
            TextSlot::Beneficiaries => Some(FormField::Beneficiaries),
            TextSlot::ExecutionDate => Some(FormField::ExecutionDate),
            TextSlot::Duration => Some(FormField::Duration),
            TextSlot::BarcodeLink => Some(FormField::BarcodeLink),
            TextSlot::Goals => Some(FormField::Goals),
            TextSlot::TeacherName => Some(FormField::TeacherName),
            TextSlot::PrincipalName => Some(FormField::PrincipalName),
            TextSlot::GeneratedAt | TextSlot::Reference => None,
        }
    }
}

/// Image elements of the preview template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Barcode,
    Evidence1,
    Evidence2,
    Evidence3,
    Evidence4,
}

/// Evidence slots in display order
pub const EVIDENCE_SLOTS: [ImageSlot; 4] = [
    ImageSlot::Evidence1,
    ImageSlot::Evidence2,
    ImageSlot::Evidence3,
    ImageSlot::Evidence4,
];

/// The hidden preview region that gets rasterized
#[allow(async_fn_in_trait)]
pub trait PreviewTemplate {
    /// Replace the text of a slot
    fn set_text(&mut self, slot: TextSlot, text: &str) -> Result<()>;

    /// Show `source` in an image slot, or clear and hide it on `None`
    fn set_image(&mut self, slot: ImageSlot, source: Option<&str>) -> Result<()>;

    /// Toggle the "no barcode" placeholder
    fn set_barcode_placeholder(&mut self, visible: bool) -> Result<()>;

    /// Full scroll size of the region in CSS pixels
    fn scroll_size(&self) -> (u32, u32);

    /// Resolve once every visible image slot has finished loading
    async fn images_loaded(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_form_field_has_a_slot() {
        for field in FormField::ALL {
            assert!(
                TextSlot::ALL.iter().any(|s| s.source() == Some(field)),
                "{field:?} has no slot"
            );
        }
    }

    #[test]
    fn test_derived_slots() {
        let derived: Vec<_> = TextSlot::ALL
            .iter()
            .filter(|s| s.source().is_none())
            .collect();
        assert_eq!(derived, vec![&TextSlot::GeneratedAt, &TextSlot::Reference]);
    }
}
