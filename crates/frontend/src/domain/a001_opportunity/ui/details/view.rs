use contracts::domain::a001_opportunity::aggregate::Opportunity;
use contracts::domain::a001_opportunity::details::{
    ImportantDate, OpportunityClause, OpportunityDocument, QualificationRule, QualificationStatus,
    StageHistoryEntry,
};
use leptos::prelude::*;
use serde_json::Value;
use thaw::*;

use crate::shared::date_utils::{format_date, format_date_opt, format_datetime};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_percent};

#[component]
fn Field(#[prop(into)] label: String, children: Children) -> impl IntoView {
    view! {
        <div class="details__field">
            <div class="details__label">{label}</div>
            <div class="details__value">{children()}</div>
        </div>
    }
}

fn empty(message: &'static str) -> AnyView {
    view! { <div class="details__empty">{message}</div> }.into_any()
}

#[component]
pub fn OverviewTab(opportunity: Opportunity) -> impl IntoView {
    let o = opportunity;
    let revenue = o
        .expected_revenue
        .map(|v| format_money(v, o.currency_symbol_or_default()));
    let state_color = if o.is_open() {
        BadgeColor::Success
    } else {
        BadgeColor::Informative
    };

    view! {
        <div class="details__summary">
            <div class="details__heading">
                <Badge appearance=BadgeAppearance::Outline>{o.opportunity_id.clone()}</Badge>
                <h3>{o.opportunity_title.clone()}</h3>
                <Badge appearance=BadgeAppearance::Filled color=state_color>{o.state.clone()}</Badge>
            </div>
            <div class="details__subheading">
                {icon("building")}
                {format!("{} • {}", o.company_name, o.opportunity_type)}
                {o.auto_converted.then(|| view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>"Auto-Converted"</Badge>
                })}
            </div>
        </div>

        <div class="details__grid">
            <Field label="Serial Number">{o.sr_no.map(|n| format!("#{}", n)).unwrap_or_else(|| "-".into())}</Field>
            <Field label="Current Stage">
                <span class="table__muted">{o.current_stage_code.clone()}</span>
                " "
                {o.current_stage_name.clone()}
            </Field>
            <Field label="Owner">{icon("user")} {o.owner_name.clone()}</Field>
            {revenue.map(|r| view! { <Field label="Expected Revenue">{r}</Field> })}
            <Field label="Created">{icon("calendar")} {format_date(&o.created_at)}</Field>
            {o.linked_lead_id.clone().filter(|l| !l.is_empty()).map(|lead| view! {
                <Field label="Linked Lead">
                    {icon("link")}
                    <Badge appearance=BadgeAppearance::Outline>{lead}</Badge>
                </Field>
            })}
        </div>

        {o.project_description.clone().filter(|d| !d.is_empty()).map(|d| view! {
            <Field label="Project Description"><p>{d}</p></Field>
        })}
        {o.remarks.clone().filter(|r| !r.is_empty()).map(|r| view! {
            <Field label="Remarks"><p>{r}</p></Field>
        })}
    }
}

#[component]
pub fn QualificationTab(
    rules: Vec<QualificationRule>,
    status: Option<QualificationStatus>,
) -> impl IntoView {
    let progress = status.map(|s| {
        view! {
            <div class="qualification__progress">
                <div class="qualification__progress-label">
                    {format!(
                        "{} of {} mandatory rules compliant ({})",
                        s.compliant_rules,
                        s.total_mandatory_rules,
                        format_percent(s.completion_percentage)
                    )}
                </div>
                <ProgressBar value=(s.completion_percentage / 100.0).clamp(0.0, 1.0) />
                {(!s.non_compliant_rules.is_empty()).then(|| view! {
                    <MessageBar intent=MessageBarIntent::Warning>
                        {format!("{} rule(s) not compliant", s.non_compliant_rules.len())}
                    </MessageBar>
                })}
            </div>
        }
    });

    let table = if rules.is_empty() {
        empty("No qualification rules configured")
    } else {
        view! {
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Code"</TableHeaderCell>
                        <TableHeaderCell>"Rule"</TableHeaderCell>
                        <TableHeaderCell>"Category"</TableHeaderCell>
                        <TableHeaderCell>"Status"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {rules.into_iter().map(|r| {
                        let status_class = format!("status-badge status-badge--{}", r.compliance_status);
                        view! {
                            <TableRow>
                                <TableCell>{r.rule_code}</TableCell>
                                <TableCell>
                                    <div>{r.rule_name}</div>
                                    {r.rule_description.map(|d| view! { <div class="table__muted">{d}</div> })}
                                </TableCell>
                                <TableCell>{r.category}</TableCell>
                                <TableCell><span class=status_class>{r.compliance_status}</span></TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
        }
        .into_any()
    };

    view! {
        {progress}
        {table}
    }
}

#[component]
pub fn HistoryTab(entries: Vec<StageHistoryEntry>) -> impl IntoView {
    if entries.is_empty() {
        return empty("No stage transitions recorded");
    }
    view! {
        <ul class="timeline">
            {entries.into_iter().map(|e| view! {
                <li class="timeline__item">
                    <div class="timeline__title">{e.stage_name}</div>
                    <div class="timeline__meta">
                        {format_datetime(&e.transition_date)}
                        {e.transitioned_by_name.map(|by| format!(" • {}", by))}
                    </div>
                </li>
            }).collect_view()}
        </ul>
    }
    .into_any()
}

#[component]
pub fn DocumentsTab(
    documents: Vec<OpportunityDocument>,
    clauses: Vec<OpportunityClause>,
) -> impl IntoView {
    let documents_view = if documents.is_empty() {
        empty("No documents uploaded")
    } else {
        view! {
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Document"</TableHeaderCell>
                        <TableHeaderCell>"Type"</TableHeaderCell>
                        <TableHeaderCell>"Uploaded By"</TableHeaderCell>
                        <TableHeaderCell>"Date"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {documents.into_iter().map(|d| view! {
                        <TableRow>
                            <TableCell>{d.document_name.unwrap_or_else(|| "-".into())}</TableCell>
                            <TableCell>{d.document_type_name.unwrap_or_else(|| "-".into())}</TableCell>
                            <TableCell>{d.created_by_name.unwrap_or_else(|| "-".into())}</TableCell>
                            <TableCell>{format_date_opt(d.created_at.as_deref())}</TableCell>
                        </TableRow>
                    }).collect_view()}
                </TableBody>
            </Table>
        }
        .into_any()
    };

    let clauses_view = if clauses.is_empty() {
        empty("No clauses defined")
    } else {
        view! {
            <ul class="details__list">
                {clauses.into_iter().map(|c| {
                    let compliance = match c.is_compliant {
                        Some(true) => "Compliant",
                        Some(false) => "Not compliant",
                        None => "Not reviewed",
                    };
                    view! {
                        <li>
                            <b>{c.clause_type.unwrap_or_else(|| "Clause".into())}</b>
                            ": "
                            {c.criteria_description.unwrap_or_default()}
                            <span class="table__muted">{format!(" ({})", compliance)}</span>
                        </li>
                    }
                }).collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <h4 class="section__title">"Documents"</h4>
        {documents_view}
        <h4 class="section__title">"Clauses"</h4>
        {clauses_view}
    }
}

#[component]
pub fn DatesTab(dates: Vec<ImportantDate>) -> impl IntoView {
    if dates.is_empty() {
        return empty("No important dates recorded");
    }
    view! {
        <ul class="timeline">
            {dates.into_iter().map(|d| view! {
                <li class="timeline__item">
                    <div class="timeline__title">{d.date_type}</div>
                    <div class="timeline__meta">
                        {format_date_opt(d.date_value.as_deref())}
                        {d.remarks.map(|r| format!(" • {}", r))}
                    </div>
                </li>
            }).collect_view()}
        </ul>
    }
    .into_any()
}

fn json_block(value: Option<Value>, missing: &'static str) -> AnyView {
    match value.filter(|v| !v.is_null()) {
        Some(v) => {
            let text = serde_json::to_string_pretty(&v).unwrap_or_else(|_| v.to_string());
            view! { <pre class="details__json">{text}</pre> }.into_any()
        }
        None => empty(missing),
    }
}

/// Won details and order analysis are shown as returned
#[component]
pub fn OutcomeTab(won_details: Option<Value>, order_analysis: Option<Value>) -> impl IntoView {
    view! {
        <h4 class="section__title">"Won Details"</h4>
        {json_block(won_details, "No won details recorded")}
        <h4 class="section__title">"Order Analysis"</h4>
        {json_block(order_analysis, "No order analysis available")}
    }
}
