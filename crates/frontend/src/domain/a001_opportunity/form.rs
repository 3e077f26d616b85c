//! Create-opportunity form: draft record, lead cascade and required-field validation

use contracts::domain::a001_opportunity::aggregate::CreateOpportunityDto;
use contracts::domain::a002_lead::aggregate::Lead;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormPhase {
    #[default]
    Idle,
    Editing,
    Submitting,
}

/// Draft fields, serialized under their wire names
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    LeadId,
    OpportunityTitle,
    OpportunityType,
    CompanyId,
    OpportunityOwnerId,
    PartnerId,
    ExpectedClosureDate,
    Remarks,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::LeadId => "lead_id",
            FormField::OpportunityTitle => "opportunity_title",
            FormField::OpportunityType => "opportunity_type",
            FormField::CompanyId => "company_id",
            FormField::OpportunityOwnerId => "opportunity_owner_id",
            FormField::PartnerId => "partner_id",
            FormField::ExpectedClosureDate => "expected_closure_date",
            FormField::Remarks => "remarks",
        }
    }

    /// Message reported when a required field is empty; `None` for optional fields
    pub fn required_message(&self) -> Option<&'static str> {
        match self {
            FormField::LeadId => Some("Lead selection is required"),
            FormField::OpportunityTitle => Some("Opportunity title is required"),
            FormField::OpportunityType => Some("Opportunity type is required"),
            FormField::CompanyId => Some("Company is required"),
            FormField::OpportunityOwnerId => Some("Opportunity owner is required"),
            FormField::PartnerId | FormField::ExpectedClosureDate | FormField::Remarks => None,
        }
    }

    pub const REQUIRED: [FormField; 5] = [
        FormField::LeadId,
        FormField::OpportunityTitle,
        FormField::OpportunityType,
        FormField::CompanyId,
        FormField::OpportunityOwnerId,
    ];

    fn value<'a>(&self, draft: &'a CreateOpportunityDto) -> &'a str {
        match self {
            FormField::LeadId => &draft.lead_id,
            FormField::OpportunityTitle => &draft.opportunity_title,
            FormField::OpportunityType => &draft.opportunity_type,
            FormField::CompanyId => &draft.company_id,
            FormField::OpportunityOwnerId => &draft.opportunity_owner_id,
            FormField::PartnerId => &draft.partner_id,
            FormField::ExpectedClosureDate => &draft.expected_closure_date,
            FormField::Remarks => &draft.remarks,
        }
    }

    fn value_mut<'a>(&self, draft: &'a mut CreateOpportunityDto) -> &'a mut String {
        match self {
            FormField::LeadId => &mut draft.lead_id,
            FormField::OpportunityTitle => &mut draft.opportunity_title,
            FormField::OpportunityType => &mut draft.opportunity_type,
            FormField::CompanyId => &mut draft.company_id,
            FormField::OpportunityOwnerId => &mut draft.opportunity_owner_id,
            FormField::PartnerId => &mut draft.partner_id,
            FormField::ExpectedClosureDate => &mut draft.expected_closure_date,
            FormField::Remarks => &mut draft.remarks,
        }
    }
}

pub type ValidationErrors = BTreeMap<FormField, String>;

/// Full validation pass. Only the title is trimmed; the other required fields
/// hold selected ids and just need to be non-empty.
pub fn validate(draft: &CreateOpportunityDto) -> ValidationErrors {
    FormField::REQUIRED
        .iter()
        .filter(|field| {
            let value = field.value(draft);
            match field {
                FormField::OpportunityTitle => value.trim().is_empty(),
                _ => value.is_empty(),
            }
        })
        .filter_map(|field| field.required_message().map(|m| (*field, m.to_string())))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunityForm {
    pub phase: FormPhase,
    pub draft: CreateOpportunityDto,
    pub errors: ValidationErrors,
}

impl OpportunityForm {
    pub fn is_open(&self) -> bool {
        self.phase != FormPhase::Idle
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Idle -> Editing with an empty draft
    pub fn open(&mut self) {
        *self = Self {
            phase: FormPhase::Editing,
            ..Self::default()
        };
    }

    /// Back to Idle; the draft is discarded
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Stores one field and clears its error.
    ///
    /// Choosing a lead found in `leads` also overwrites title, company, owner
    /// and type from that lead, whatever they held before.
    pub fn edit(&mut self, field: FormField, value: String, leads: &[Lead]) {
        if field == FormField::LeadId && !value.is_empty() {
            if let Some(lead) = leads.iter().find(|l| l.id == value) {
                self.draft.opportunity_title = lead.project_title.clone();
                self.draft.company_id = lead.company_id.clone();
                self.draft.opportunity_owner_id = lead.assigned_to_user_id.clone();
                self.draft.opportunity_type = lead.opportunity_type().as_str().to_string();
            }
        }
        *field.value_mut(&mut self.draft) = value;
        self.errors.remove(&field);
    }

    /// Editing -> Submitting when the draft is valid, returning the payload to send.
    ///
    /// An invalid draft stays in Editing with the full error map replaced.
    /// Outside Editing nothing happens and `None` is returned.
    pub fn begin_submit(&mut self) -> Option<Result<CreateOpportunityDto, ValidationErrors>> {
        if self.phase != FormPhase::Editing {
            return None;
        }
        let errors = validate(&self.draft);
        self.errors = errors.clone();
        if !errors.is_empty() {
            return Some(Err(errors));
        }
        self.phase = FormPhase::Submitting;
        Some(Ok(self.draft.clone()))
    }

    /// Submitting -> Idle, draft reset
    pub fn submit_succeeded(&mut self) {
        *self = Self::default();
    }

    /// Submitting -> Editing, draft kept for retry
    pub fn submit_failed(&mut self) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Editing;
        }
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(id: &str, subtype: &str) -> Lead {
        Lead {
            id: id.into(),
            lead_id: format!("LEAD-{}", id),
            project_title: format!("Project {}", id),
            company_id: "c1".into(),
            assigned_to_user_id: "u1".into(),
            lead_subtype_name: subtype.into(),
            approval_status: "approved".into(),
            ..Default::default()
        }
    }

    fn complete_draft() -> CreateOpportunityDto {
        CreateOpportunityDto {
            lead_id: "l1".into(),
            opportunity_title: "ERP rollout".into(),
            opportunity_type: "Tender".into(),
            company_id: "c1".into(),
            opportunity_owner_id: "u1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_resets_draft() {
        let mut form = OpportunityForm {
            draft: complete_draft(),
            ..Default::default()
        };
        form.open();
        assert_eq!(form.phase, FormPhase::Editing);
        assert_eq!(form.draft, CreateOpportunityDto::default());
    }

    #[test]
    fn test_pretender_lead_cascades_to_tender() {
        let leads = vec![lead("l1", "Pretender"), lead("l2", "Standard")];
        let mut form = OpportunityForm::default();
        form.open();

        form.edit(FormField::LeadId, "l1".into(), &leads);
        assert_eq!(form.draft.lead_id, "l1");
        assert_eq!(form.draft.opportunity_type, "Tender");
        assert_eq!(form.draft.opportunity_title, "Project l1");
        assert_eq!(form.draft.company_id, "c1");
        assert_eq!(form.draft.opportunity_owner_id, "u1");

        form.edit(FormField::LeadId, "l2".into(), &leads);
        assert_eq!(form.draft.opportunity_type, "Non-Tender");
    }

    #[test]
    fn test_cascade_overwrites_user_edits() {
        let leads = vec![lead("l1", "Tender")];
        let mut form = OpportunityForm::default();
        form.open();
        form.edit(FormField::OpportunityTitle, "My own title".into(), &leads);
        form.edit(FormField::LeadId, "l1".into(), &leads);
        assert_eq!(form.draft.opportunity_title, "Project l1");
    }

    #[test]
    fn test_unknown_or_empty_lead_only_stores_value() {
        let leads = vec![lead("l1", "Tender")];
        let mut form = OpportunityForm::default();
        form.open();
        form.edit(FormField::OpportunityTitle, "Kept".into(), &leads);

        form.edit(FormField::LeadId, "missing".into(), &leads);
        assert_eq!(form.draft.lead_id, "missing");
        assert_eq!(form.draft.opportunity_title, "Kept");

        form.edit(FormField::LeadId, String::new(), &leads);
        assert_eq!(form.draft.lead_id, "");
        assert_eq!(form.draft.opportunity_title, "Kept");
    }

    #[test]
    fn test_missing_company_is_the_only_error() {
        let mut form = OpportunityForm::default();
        form.open();
        form.draft = CreateOpportunityDto {
            company_id: String::new(),
            ..complete_draft()
        };

        let errors = form.begin_submit().unwrap().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&FormField::CompanyId).map(String::as_str), Some("Company is required"));
        assert_eq!(form.phase, FormPhase::Editing);
        assert_eq!(form.draft.opportunity_title, "ERP rollout");
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let draft = CreateOpportunityDto {
            opportunity_title: "   ".into(),
            ..complete_draft()
        };
        let errors = validate(&draft);
        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec![FormField::OpportunityTitle]);
    }

    #[test]
    fn test_empty_draft_reports_every_required_field() {
        let errors = validate(&CreateOpportunityDto::default());
        assert_eq!(errors.len(), FormField::REQUIRED.len());
        assert!(errors.get(&FormField::Remarks).is_none());
        assert!(errors.get(&FormField::ExpectedClosureDate).is_none());
    }

    #[test]
    fn test_edit_clears_only_that_error() {
        let mut form = OpportunityForm::default();
        form.open();
        let _ = form.begin_submit();
        assert_eq!(form.errors.len(), 5);

        form.edit(FormField::OpportunityTitle, "Title".into(), &[]);
        assert!(form.error(FormField::OpportunityTitle).is_none());
        assert_eq!(form.error(FormField::LeadId), Some("Lead selection is required"));
        assert_eq!(form.errors.len(), 4);
    }

    #[test]
    fn test_submit_lifecycle() {
        let mut form = OpportunityForm::default();
        form.open();
        form.draft = complete_draft();

        let payload = form.begin_submit().unwrap().unwrap();
        assert_eq!(payload, complete_draft());
        assert!(form.is_submitting());

        form.submit_failed();
        assert_eq!(form.phase, FormPhase::Editing);
        assert_eq!(form.draft, complete_draft());

        form.begin_submit().unwrap().unwrap();
        form.submit_succeeded();
        assert_eq!(form, OpportunityForm::default());
        assert!(!form.is_open());
    }

    #[test]
    fn test_submit_only_starts_from_editing() {
        let mut form = OpportunityForm {
            draft: complete_draft(),
            ..Default::default()
        };
        assert!(form.begin_submit().is_none());
        assert_eq!(form.phase, FormPhase::Idle);

        form.phase = FormPhase::Editing;
        assert!(form.begin_submit().is_some());
        assert!(form.is_submitting());
        assert!(form.begin_submit().is_none());
        assert!(form.is_submitting());
    }

    #[test]
    fn test_errors_serialize_with_wire_names() {
        let errors = validate(&CreateOpportunityDto {
            company_id: String::new(),
            ..complete_draft()
        });
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"company_id":"Company is required"}"#
        );
        assert_eq!(FormField::CompanyId.as_str(), "company_id");
    }
}
