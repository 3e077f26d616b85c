use contracts::domain::a001_opportunity::aggregate::Opportunity;
use contracts::domain::a001_opportunity::analytics::AnalyticsPeriod;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_opportunity::api::OpportunityApi;
use crate::domain::a001_opportunity::form::FormField;
use crate::domain::a001_opportunity::orchestrator;
use crate::domain::a001_opportunity::state::{create_state, NoticeLevel, OpportunityViewState};
use crate::shared::config::FrontendConfig;
use crate::shared::http::GlooTransport;

/// ViewModel of the opportunity page; `Copy` so handlers can capture it freely
#[derive(Clone, Copy)]
pub struct OpportunityListViewModel {
    pub state: RwSignal<OpportunityViewState>,
    api: StoredValue<OpportunityApi<GlooTransport>>,
    period: AnalyticsPeriod,
}

impl OpportunityListViewModel {
    pub fn new(config: &FrontendConfig) -> Self {
        Self {
            state: create_state(),
            api: StoredValue::new(OpportunityApi::new(GlooTransport::from_config(config))),
            period: config.analytics_period,
        }
    }

    pub fn load_all(&self) {
        let (api, state, period) = (self.api.get_value(), self.state, self.period);
        spawn_local(async move {
            orchestrator::load_all(&api, &state, period).await;
        });
    }

    pub fn open_details(&self, opportunity: Opportunity) {
        let (api, state) = (self.api.get_value(), self.state);
        spawn_local(async move {
            orchestrator::open_opportunity(&api, &state, opportunity).await;
        });
    }

    pub fn submit_create(&self) {
        let (api, state, period) = (self.api.get_value(), self.state, self.period);
        spawn_local(async move {
            orchestrator::submit_create(&api, &state, period).await;
        });
    }

    pub fn auto_convert(&self) {
        let (api, state, period) = (self.api.get_value(), self.state, self.period);
        spawn_local(async move {
            orchestrator::run_auto_conversion(&api, &state, period).await;
        });
    }

    pub fn notify_info(&self, message: &str) {
        orchestrator::notify(&self.state, NoticeLevel::Info, message.to_string());
    }

    pub fn edit_field(&self, field: FormField, value: String) {
        self.state.update(|s| s.edit_form_field(field, value));
    }

    pub fn is_busy(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.loading || s.converting || s.form.is_submitting()))
    }
}
