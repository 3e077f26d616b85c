use crate::domain::a001_opportunity::aggregate::OpportunityType;
use crate::shared::serde_utils::null_as_default;
use serde::{Deserialize, Serialize};

pub const APPROVAL_STATUS_APPROVED: &str = "approved";

/// Lead as returned by `GET /api/leads?status=approved`.
///
/// Only the fields the opportunity page reads are kept; everything else in the
/// backend record is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,

    /// Human-readable lead code, e.g. `LEAD-0000042`
    #[serde(default, deserialize_with = "null_as_default")]
    pub lead_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub project_title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub company_id: String,

    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub assigned_to_user_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub lead_subtype_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub approval_status: String,
}

impl Lead {
    pub fn is_approved(&self) -> bool {
        self.approval_status == APPROVAL_STATUS_APPROVED
    }

    /// Opportunity type a conversion of this lead starts with
    pub fn opportunity_type(&self) -> OpportunityType {
        OpportunityType::from_lead_subtype(&self.lead_subtype_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(subtype: &str) -> Lead {
        Lead {
            id: "l1".into(),
            lead_subtype_name: subtype.into(),
            approval_status: "approved".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_subtype_maps_to_opportunity_type() {
        assert_eq!(lead("Tender").opportunity_type(), OpportunityType::Tender);
        assert_eq!(lead("Pretender").opportunity_type(), OpportunityType::Tender);
        assert_eq!(lead("Standard").opportunity_type(), OpportunityType::NonTender);
        assert_eq!(lead("").opportunity_type(), OpportunityType::NonTender);
    }

    #[test]
    fn test_approval_is_exact_match() {
        let mut l = lead("Tender");
        assert!(l.is_approved());
        l.approval_status = "Approved".into();
        assert!(!l.is_approved());
        l.approval_status = "pending".into();
        assert!(!l.is_approved());
    }

    #[test]
    fn test_deserialize_with_nulls() {
        let l: Lead = serde_json::from_str(
            r#"{"id": "l7", "lead_id": "LEAD-7", "project_title": null, "approval_status": "approved", "budget": 1200}"#,
        )
        .unwrap();
        assert_eq!(l.lead_id, "LEAD-7");
        assert_eq!(l.project_title, "");
        assert!(l.is_approved());
    }
}
