//! View state of the opportunity page.
//!
//! Everything the page renders lives in one `OpportunityViewState`; the
//! orchestrator and the UI change it only through the transitions below.

use chrono::Local;
use contracts::domain::a001_opportunity::aggregate::{CreateOpportunityDto, Opportunity};
use contracts::domain::a001_opportunity::analytics::{Kpi, OpportunityAnalytics, TeamPerformance};
use contracts::domain::a001_opportunity::details::OpportunityDetails;
use contracts::shared::master_data::MasterData;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use super::filter::visible_opportunities;
use super::form::{FormField, OpportunityForm, ValidationErrors};
use super::statistics::OpportunityStatistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Opportunity open in the view dialog with whatever detail slices have arrived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDialog {
    pub opportunity: Opportunity,
    pub generation: u64,
    pub details: OpportunityDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityViewState {
    pub opportunities: Vec<Opportunity>,
    pub master_data: MasterData,
    pub analytics: Option<OpportunityAnalytics>,
    pub kpis: Vec<Kpi>,
    pub team_performance: Option<TeamPerformance>,
    pub statistics: OpportunityStatistics,
    pub search_term: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub loading: bool,
    pub converting: bool,
    pub form: OpportunityForm,
    pub view: Option<ViewDialog>,
    pub notices: Vec<Notice>,
    next_notice_id: u64,
    view_generation: u64,
}

impl Default for OpportunityViewState {
    fn default() -> Self {
        Self {
            opportunities: Vec::new(),
            master_data: MasterData::default(),
            analytics: None,
            kpis: Vec::new(),
            team_performance: None,
            statistics: OpportunityStatistics::default(),
            search_term: String::new(),
            sort_field: String::new(),
            sort_ascending: true,
            loading: false,
            converting: false,
            form: OpportunityForm::default(),
            view: None,
            notices: Vec::new(),
            next_notice_id: 1,
            view_generation: 0,
        }
    }
}

impl OpportunityViewState {
    // ------------------------------------------------------------------
    // Fetched slices
    // ------------------------------------------------------------------

    pub fn replace_opportunities(&mut self, opportunities: Vec<Opportunity>) {
        self.opportunities = opportunities;
        self.recompute_statistics();
    }

    pub fn replace_analytics(&mut self, analytics: Option<OpportunityAnalytics>) {
        self.analytics = analytics;
        self.recompute_statistics();
    }

    pub fn replace_master_data(&mut self, master_data: MasterData) {
        self.master_data = master_data;
    }

    pub fn replace_kpis(&mut self, kpis: Vec<Kpi>) {
        self.kpis = kpis;
    }

    pub fn replace_team_performance(&mut self, team_performance: Option<TeamPerformance>) {
        self.team_performance = team_performance;
    }

    fn recompute_statistics(&mut self) {
        self.statistics = OpportunityStatistics::calculate(
            &self.opportunities,
            self.analytics.as_ref(),
            Local::now().date_naive(),
        );
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_converting(&mut self, converting: bool) {
        self.converting = converting;
    }

    // ------------------------------------------------------------------
    // Table
    // ------------------------------------------------------------------

    pub fn set_search_term(&mut self, term: String) {
        self.search_term = term;
    }

    /// Same column flips direction, a new column starts ascending
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field.to_string();
            self.sort_ascending = true;
        }
    }

    pub fn visible_opportunities(&self) -> Vec<Opportunity> {
        visible_opportunities(
            &self.opportunities,
            &self.search_term,
            &self.sort_field,
            self.sort_ascending,
        )
    }

    // ------------------------------------------------------------------
    // Create form
    // ------------------------------------------------------------------

    pub fn open_form(&mut self) {
        self.form.open();
    }

    pub fn cancel_form(&mut self) {
        if !self.form.is_submitting() {
            self.form.cancel();
        }
    }

    pub fn edit_form_field(&mut self, field: FormField, value: String) {
        self.form.edit(field, value, &self.master_data.approved_leads);
    }

    pub fn begin_submit(&mut self) -> Option<Result<CreateOpportunityDto, ValidationErrors>> {
        self.form.begin_submit()
    }

    pub fn submit_succeeded(&mut self) {
        self.form.submit_succeeded();
    }

    pub fn submit_failed(&mut self) {
        self.form.submit_failed();
    }

    // ------------------------------------------------------------------
    // View dialog
    // ------------------------------------------------------------------

    /// Opens the dialog and returns the generation its detail fetches must carry
    pub fn open_view(&mut self, opportunity: Opportunity) -> u64 {
        self.view_generation += 1;
        self.view = Some(ViewDialog {
            opportunity,
            generation: self.view_generation,
            details: OpportunityDetails::default(),
        });
        self.view_generation
    }

    pub fn close_view(&mut self) {
        self.view = None;
    }

    /// Applies detail slices when the dialog that requested them is still open.
    /// Returns `false` for a stale response.
    pub fn apply_details(
        &mut self,
        generation: u64,
        apply: impl FnOnce(&mut OpportunityDetails),
    ) -> bool {
        match self.view.as_mut() {
            Some(view) if view.generation == generation => {
                apply(&mut view.details);
                true
            }
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Notices
    // ------------------------------------------------------------------

    pub fn push_notice(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        let id = self.next_notice_id;
        self.next_notice_id += 1;
        self.notices.push(Notice {
            id,
            level,
            message: message.into(),
        });
        id
    }

    pub fn dismiss_notice(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }
}

// Create state within component scope instead of thread-local
pub fn create_state() -> RwSignal<OpportunityViewState> {
    RwSignal::new(OpportunityViewState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_lead::aggregate::Lead;

    fn opp(id: &str, state: &str) -> Opportunity {
        Opportunity {
            id: id.into(),
            opportunity_id: format!("OPP-{}", id),
            opportunity_title: format!("Deal {}", id),
            opportunity_type: "Tender".into(),
            state: state.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_replacing_list_recomputes_statistics() {
        let mut state = OpportunityViewState::default();
        state.replace_opportunities(vec![opp("1", "Open"), opp("2", "Won")]);
        assert_eq!(state.statistics.total_opportunities, 2);
        assert_eq!(state.statistics.open_opportunities, 1);

        state.replace_analytics(Some(OpportunityAnalytics {
            win_rate: Some(50.0),
            ..Default::default()
        }));
        assert_eq!(state.statistics.win_rate, 50.0);
        assert_eq!(state.statistics.total_opportunities, 2);

        state.replace_analytics(None);
        assert_eq!(state.statistics.win_rate, 0.0);
    }

    #[test]
    fn test_search_hides_rows_without_dropping_them() {
        let mut state = OpportunityViewState::default();
        state.replace_opportunities(vec![opp("1", "Open"), opp("2", "Open")]);
        state.set_search_term("deal 2".into());
        assert_eq!(state.visible_opportunities().len(), 1);
        assert_eq!(state.opportunities.len(), 2);
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = OpportunityViewState::default();
        state.toggle_sort("created_at");
        assert_eq!((state.sort_field.as_str(), state.sort_ascending), ("created_at", true));
        state.toggle_sort("created_at");
        assert!(!state.sort_ascending);
        state.toggle_sort("state");
        assert_eq!((state.sort_field.as_str(), state.sort_ascending), ("state", true));
    }

    #[test]
    fn test_form_cascade_uses_loaded_leads() {
        let mut state = OpportunityViewState::default();
        state.replace_master_data(MasterData {
            approved_leads: vec![Lead {
                id: "l1".into(),
                project_title: "Bridge".into(),
                lead_subtype_name: "Tender".into(),
                ..Default::default()
            }],
            ..Default::default()
        });
        state.open_form();
        state.edit_form_field(FormField::LeadId, "l1".into());
        assert_eq!(state.form.draft.opportunity_title, "Bridge");
        assert_eq!(state.form.draft.opportunity_type, "Tender");
    }

    #[test]
    fn test_cancel_is_ignored_while_submitting() {
        let mut state = OpportunityViewState::default();
        state.open_form();
        state.form.draft = CreateOpportunityDto {
            lead_id: "l1".into(),
            opportunity_title: "t".into(),
            opportunity_type: "Tender".into(),
            company_id: "c".into(),
            opportunity_owner_id: "u".into(),
            ..Default::default()
        };
        state.begin_submit().unwrap().unwrap();
        state.cancel_form();
        assert!(state.form.is_submitting());
    }

    #[test]
    fn test_stale_details_are_dropped() {
        let mut state = OpportunityViewState::default();
        let first = state.open_view(opp("1", "Open"));
        state.close_view();
        let second = state.open_view(opp("2", "Open"));
        assert_ne!(first, second);

        let applied = state.apply_details(first, |d| d.won_details = Some(serde_json::json!({"x": 1})));
        assert!(!applied);
        assert!(state.view.as_ref().unwrap().details.won_details.is_none());

        assert!(state.apply_details(second, |d| d.won_details = Some(serde_json::json!({"x": 2}))));

        state.close_view();
        assert!(!state.apply_details(second, |_| {}));
    }

    #[test]
    fn test_notices() {
        let mut state = OpportunityViewState::default();
        let a = state.push_notice(NoticeLevel::Error, "first");
        let b = state.push_notice(NoticeLevel::Success, "second");
        assert_ne!(a, b);
        state.dismiss_notice(a);
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].message, "second");
    }

    #[test]
    fn test_state_is_serializable() {
        let mut state = OpportunityViewState::default();
        state.replace_opportunities(vec![opp("1", "Open")]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["statistics"]["total_opportunities"], 1);
        assert_eq!(json["form"]["phase"], "Idle");
    }
}
