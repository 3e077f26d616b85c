use contracts::domain::a001_opportunity::aggregate::{CreateOpportunityDto, OpportunityType};
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_opportunity::form::FormField;
use crate::domain::a001_opportunity::ui::list::view_model::OpportunityListViewModel;
use crate::shared::modal::Modal;

/// Label, control and the field's inline error
#[component]
fn FormRow(
    vm: OpportunityListViewModel,
    field: FormField,
    #[prop(into)] label: String,
    #[prop(optional)] required: bool,
    children: Children,
) -> impl IntoView {
    let state = vm.state;
    let error = move || state.with(|s| s.form.error(field).map(str::to_string));

    view! {
        <div class="form__group" class:form__group--invalid=move || error().is_some()>
            <label class="form__label">
                {label}
                {required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            {children()}
            {move || error().map(|e| view! { <p class="form__error">{e}</p> })}
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn CreateOpportunityDialog(vm: OpportunityListViewModel) -> impl IntoView {
    let state = vm.state;
    let draft = move |pick: fn(&CreateOpportunityDto) -> String| state.with(|s| pick(&s.form.draft));
    let submitting = Signal::derive(move || state.with(|s| s.form.is_submitting()));
    let on_edit = move |field: FormField| move |ev: leptos::ev::Event| vm.edit_field(field, event_target_value(&ev));

    let on_close = Callback::new(move |_| state.update(|s| s.cancel_form()));

    let footer: ChildrenFn = std::sync::Arc::new(move || {
        view! {
            <Flex gap=FlexGap::Small justify=FlexJustify::End>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| state.update(|s| s.cancel_form())
                    disabled=submitting
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.submit_create()
                    disabled=submitting
                >
                    {move || if submitting.get() { "Creating..." } else { "Create Opportunity" }}
                </Button>
            </Flex>
        }
        .into_any()
    });

    view! {
        <Modal
            title="Create New Opportunity"
            description="Create an opportunity from an approved lead. Details are filled in from the selected lead."
            on_close=on_close
            footer=footer
        >
            <div class="form">
                <h3 class="form__section-title">"Lead Selection"</h3>
                <FormRow vm=vm field=FormField::LeadId label="Approved Lead" required=true>
                    <select
                        class="form__select"
                        prop:value=move || draft(|d| d.lead_id.clone())
                        on:change=on_edit(FormField::LeadId)
                    >
                        <option value="">"Select an approved lead"</option>
                        {move || state.with(|s| {
                            s.master_data.approved_leads.iter().map(|lead| {
                                let label = match lead.company_name.as_deref() {
                                    Some(company) if !company.is_empty() => {
                                        format!("{} - {} ({})", lead.lead_id, lead.project_title, company)
                                    }
                                    _ => format!("{} - {}", lead.lead_id, lead.project_title),
                                };
                                view! { <option value=lead.id.clone()>{label}</option> }
                            }).collect_view()
                        })}
                    </select>
                    <Show when=move || state.with(|s| s.master_data.approved_leads.is_empty())>
                        <p class="form__hint form__hint--warning">
                            "No approved leads available for opportunity creation"
                        </p>
                    </Show>
                </FormRow>

                <h3 class="form__section-title">"Opportunity Details"</h3>
                <FormRow vm=vm field=FormField::OpportunityTitle label="Opportunity Title" required=true>
                    <input
                        type="text"
                        class="form__input"
                        placeholder="Enter opportunity title"
                        prop:value=move || draft(|d| d.opportunity_title.clone())
                        on:input=on_edit(FormField::OpportunityTitle)
                    />
                </FormRow>

                <FormRow vm=vm field=FormField::OpportunityType label="Opportunity Type" required=true>
                    <select
                        class="form__select"
                        prop:value=move || draft(|d| d.opportunity_type.clone())
                        on:change=on_edit(FormField::OpportunityType)
                    >
                        <option value="">"Select opportunity type"</option>
                        {OpportunityType::ALL.iter().map(|t| view! {
                            <option value=t.as_str()>{t.as_str()}</option>
                        }).collect_view()}
                    </select>
                </FormRow>

                <FormRow vm=vm field=FormField::CompanyId label="Company" required=true>
                    <select
                        class="form__select"
                        prop:value=move || draft(|d| d.company_id.clone())
                        on:change=on_edit(FormField::CompanyId)
                    >
                        <option value="">"Select company"</option>
                        {move || state.with(|s| {
                            s.master_data.companies.iter().map(|c| view! {
                                <option value=c.company_id.clone()>{c.company_name.clone()}</option>
                            }).collect_view()
                        })}
                    </select>
                </FormRow>

                <FormRow vm=vm field=FormField::OpportunityOwnerId label="Opportunity Owner" required=true>
                    <select
                        class="form__select"
                        prop:value=move || draft(|d| d.opportunity_owner_id.clone())
                        on:change=on_edit(FormField::OpportunityOwnerId)
                    >
                        <option value="">"Select opportunity owner"</option>
                        {move || state.with(|s| {
                            s.master_data.users.iter().map(|u| {
                                let label = match u.email.as_deref() {
                                    Some(email) if !email.is_empty() => format!("{} ({})", u.display_name(), email),
                                    _ => u.display_name(),
                                };
                                view! { <option value=u.id.clone()>{label}</option> }
                            }).collect_view()
                        })}
                    </select>
                </FormRow>

                <FormRow vm=vm field=FormField::ExpectedClosureDate label="Expected Closure Date">
                    <input
                        type="date"
                        class="form__input"
                        prop:value=move || draft(|d| d.expected_closure_date.clone())
                        on:input=on_edit(FormField::ExpectedClosureDate)
                    />
                </FormRow>

                <FormRow vm=vm field=FormField::Remarks label="Remarks">
                    <textarea
                        class="form__textarea"
                        rows="3"
                        placeholder="Enter any additional remarks..."
                        prop:value=move || draft(|d| d.remarks.clone())
                        on:input=on_edit(FormField::Remarks)
                    ></textarea>
                </FormRow>
            </div>
        </Modal>
    }
}
