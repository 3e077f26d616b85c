//! Per-opportunity payloads loaded when an opportunity is opened for viewing

use crate::shared::serde_utils::null_as_default;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualificationRule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rule_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rule_name: String,
    #[serde(default)]
    pub rule_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub compliance_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualificationStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub completion_percentage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub compliant_rules: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_mandatory_rules: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pending_rules: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub non_compliant_rules: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageHistoryEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transition_date: String,
    #[serde(default)]
    pub transitioned_by_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunityDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub document_name: Option<String>,
    #[serde(default)]
    pub document_type_name: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunityClause {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub clause_type: Option<String>,
    #[serde(default)]
    pub criteria_description: Option<String>,
    #[serde(default)]
    pub is_compliant: Option<bool>,
}

/// Tender calendar entry; only tenders have these
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportantDate {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_type: String,
    #[serde(default)]
    pub date_value: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Everything the view dialog shows besides the opportunity row itself.
///
/// Each slice is loaded independently; a failed load leaves it empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunityDetails {
    pub qualification_rules: Vec<QualificationRule>,
    pub qualification_status: Option<QualificationStatus>,
    pub stage_history: Vec<StageHistoryEntry>,
    pub documents: Vec<OpportunityDocument>,
    pub clauses: Vec<OpportunityClause>,
    pub important_dates: Vec<ImportantDate>,
    pub won_details: Option<Value>,
    pub order_analysis: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_ignores_extra_fields() {
        let r: QualificationRule = serde_json::from_str(
            r#"{"id": "r1", "rule_code": "QR001", "rule_name": "Budget confirmed", "category": "Commercial", "compliance_status": "pending", "is_mandatory": true}"#,
        )
        .unwrap();
        assert_eq!(r.rule_code, "QR001");
        assert_eq!(r.rule_description, None);
    }

    #[test]
    fn test_status_with_null_lists() {
        let s: QualificationStatus = serde_json::from_str(
            r#"{"completion_percentage": 37.5, "compliant_rules": 3, "total_mandatory_rules": 8, "pending_rules": null}"#,
        )
        .unwrap();
        assert_eq!(s.compliant_rules, 3);
        assert!(s.pending_rules.is_empty());
    }
}
