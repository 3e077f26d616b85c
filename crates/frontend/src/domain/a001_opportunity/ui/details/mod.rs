mod view;

use leptos::prelude::*;
use thaw::*;

use self::view::{DatesTab, DocumentsTab, HistoryTab, OutcomeTab, OverviewTab, QualificationTab};
use crate::domain::a001_opportunity::state::OpportunityViewState;
use crate::shared::modal::Modal;

const TAB_OVERVIEW: &str = "overview";
const TAB_QUALIFICATION: &str = "qualification";
const TAB_HISTORY: &str = "history";
const TAB_DOCUMENTS: &str = "documents";
const TAB_DATES: &str = "dates";
const TAB_OUTCOME: &str = "outcome";

/// Read-only view of the opportunity in `state.view`
#[component]
#[allow(non_snake_case)]
pub fn OpportunityDetailsDialog(state: RwSignal<OpportunityViewState>) -> impl IntoView {
    let selected_tab = RwSignal::new(TAB_OVERVIEW.to_string());
    let is_tender = Signal::derive(move || {
        state.with(|s| s.view.as_ref().map(|v| v.opportunity.is_tender()).unwrap_or(false))
    });
    let on_close = Callback::new(move |_| state.update(|s| s.close_view()));

    view! {
        <Modal
            title="Opportunity Details"
            description="Opportunity information, qualification progress and linked lead details"
            on_close=on_close
        >
            <TabList selected_value=selected_tab>
                <Tab value=TAB_OVERVIEW>"Overview"</Tab>
                <Tab value=TAB_QUALIFICATION>"Qualification"</Tab>
                <Tab value=TAB_HISTORY>"Stage History"</Tab>
                <Tab value=TAB_DOCUMENTS>"Documents"</Tab>
                <Show when=move || is_tender.get()>
                    <Tab value=TAB_DATES>"Important Dates"</Tab>
                </Show>
                <Tab value=TAB_OUTCOME>"Outcome"</Tab>
            </TabList>

            <div class="details__tab-content">
                {move || {
                    let Some(dialog) = state.with(|s| s.view.clone()) else {
                        return ().into_any();
                    };
                    match selected_tab.get().as_str() {
                        TAB_QUALIFICATION => view! {
                            <QualificationTab
                                rules=dialog.details.qualification_rules
                                status=dialog.details.qualification_status
                            />
                        }.into_any(),
                        TAB_HISTORY => view! { <HistoryTab entries=dialog.details.stage_history /> }.into_any(),
                        TAB_DOCUMENTS => view! {
                            <DocumentsTab documents=dialog.details.documents clauses=dialog.details.clauses />
                        }.into_any(),
                        TAB_DATES => view! { <DatesTab dates=dialog.details.important_dates /> }.into_any(),
                        TAB_OUTCOME => view! {
                            <OutcomeTab
                                won_details=dialog.details.won_details
                                order_analysis=dialog.details.order_analysis
                            />
                        }.into_any(),
                        _ => view! { <OverviewTab opportunity=dialog.opportunity /> }.into_any(),
                    }
                }}
            </div>
        </Modal>
    }
}
