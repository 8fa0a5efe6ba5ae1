use crate::domain::{entities::CampaignDraft, error::DomainError, value_objects::SectionName};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_draft(draft: &CampaignDraft) -> Result<(), DomainError> {
        draft.validate()
    }

    pub fn validate_sections(draft: &CampaignDraft) -> Result<Vec<SectionName>, DomainError> {
        draft.section_names()
    }
}
