//! Client-side selection over already loaded data

use contracts::domain::a001_opportunity::aggregate::Opportunity;
use contracts::domain::a002_lead::aggregate::Lead;
use std::cmp::Ordering;

use crate::shared::list_utils::{contains_ci, filter_list, sort_list, Searchable, Sortable};

impl Searchable for Opportunity {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.opportunity_title, filter)
            || contains_ci(&self.opportunity_id, filter)
            || contains_ci(&self.company_name, filter)
    }

    fn get_field_value(&self, field: &str) -> Option<String> {
        match field {
            "opportunity_title" => Some(self.opportunity_title.clone()),
            "opportunity_id" => Some(self.opportunity_id.clone()),
            "company_name" => Some(self.company_name.clone()),
            _ => None,
        }
    }
}

impl Sortable for Opportunity {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "opportunity_id" => self.opportunity_id.cmp(&other.opportunity_id),
            "sr_no" => self.sr_no.cmp(&other.sr_no),
            "opportunity_title" => self
                .opportunity_title
                .to_lowercase()
                .cmp(&other.opportunity_title.to_lowercase()),
            "company_name" => self
                .company_name
                .to_lowercase()
                .cmp(&other.company_name.to_lowercase()),
            "opportunity_type" => self.opportunity_type.cmp(&other.opportunity_type),
            "current_stage_name" => self
                .current_stage_name
                .to_lowercase()
                .cmp(&other.current_stage_name.to_lowercase())
                .then_with(|| self.current_stage_code.cmp(&other.current_stage_code)),
            "expected_revenue" => self
                .expected_revenue
                .unwrap_or(0.0)
                .total_cmp(&other.expected_revenue.unwrap_or(0.0)),
            "state" => self.state.cmp(&other.state),
            "owner_name" => self.owner_name.to_lowercase().cmp(&other.owner_name.to_lowercase()),
            "created_at" => self.created_at_local().cmp(&other.created_at_local()),
            _ => Ordering::Equal,
        }
    }
}

/// Rows shown in the table: search first, then the active sort.
///
/// An empty `sort_field` keeps backend order.
pub fn visible_opportunities(
    opportunities: &[Opportunity],
    search_term: &str,
    sort_field: &str,
    ascending: bool,
) -> Vec<Opportunity> {
    let mut rows = filter_list(opportunities, search_term);
    if !sort_field.is_empty() {
        sort_list(&mut rows, sort_field, ascending);
    }
    rows
}

/// Approved leads with no opportunity created from them yet
pub fn eligible_leads(leads: &[Lead], opportunities: &[Opportunity]) -> Vec<Lead> {
    leads
        .iter()
        .filter(|lead| lead.is_approved())
        .filter(|lead| !opportunities.iter().any(|o| o.references_lead(&lead.id)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opp(code: &str, title: &str, company: &str) -> Opportunity {
        Opportunity {
            id: code.to_lowercase(),
            opportunity_id: code.into(),
            opportunity_title: title.into(),
            company_name: company.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_acme_keeps_only_matching_title() {
        let list = vec![
            opp("OPP-0000001", "Acme Corp Deal", "Globex"),
            opp("OPP-0000002", "Other Deal", "Initech"),
        ];
        let rows = visible_opportunities(&list, "acme", "", true);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].opportunity_title, "Acme Corp Deal");
        // state is untouched
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_search_matches_id_and_company() {
        let list = vec![
            opp("OPP-0000001", "Alpha", "Globex"),
            opp("OPP-0000002", "Beta", "Initech"),
        ];
        assert_eq!(visible_opportunities(&list, "0002", "", true)[0].opportunity_title, "Beta");
        assert_eq!(visible_opportunities(&list, "GLOBEX", "", true)[0].opportunity_title, "Alpha");
        assert_eq!(visible_opportunities(&list, "", "", true).len(), 2);
        assert!(visible_opportunities(&list, "zzz", "", true).is_empty());
    }

    #[test]
    fn test_sort_by_revenue_treats_missing_as_zero() {
        let mut a = opp("OPP-1", "a", "x");
        a.expected_revenue = Some(500.0);
        let b = opp("OPP-2", "b", "x");
        let mut c = opp("OPP-3", "c", "x");
        c.expected_revenue = Some(100.0);

        let rows = visible_opportunities(&[a, b, c], "", "expected_revenue", false);
        let ids: Vec<_> = rows.iter().map(|o| o.opportunity_id.as_str()).collect();
        assert_eq!(ids, vec!["OPP-1", "OPP-3", "OPP-2"]);
    }

    #[test]
    fn test_sort_by_stage_uses_displayed_name() {
        let stage = |code: &str, stage_code: &str, name: &str| Opportunity {
            current_stage_code: stage_code.into(),
            current_stage_name: name.into(),
            ..opp(code, "t", "x")
        };
        let list = vec![
            stage("OPP-1", "ST01", "Qualification"),
            stage("OPP-2", "ST02", "negotiation"),
            stage("OPP-3", "ST00", "Prospect"),
        ];

        let rows = visible_opportunities(&list, "", "current_stage_name", true);
        let ids: Vec<_> = rows.iter().map(|o| o.opportunity_id.as_str()).collect();
        assert_eq!(ids, vec!["OPP-2", "OPP-3", "OPP-1"]);
    }

    #[test]
    fn test_eligible_leads_excludes_converted_and_unapproved() {
        let lead = |id: &str, status: &str| Lead {
            id: id.into(),
            approval_status: status.into(),
            ..Default::default()
        };
        let leads = vec![lead("l1", "approved"), lead("l2", "approved"), lead("l3", "pending")];
        let converted = Opportunity {
            lead_id: Some("l1".into()),
            ..Default::default()
        };

        let eligible = eligible_leads(&leads, &[converted]);
        assert_eq!(eligible.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec!["l2"]);
    }
}
