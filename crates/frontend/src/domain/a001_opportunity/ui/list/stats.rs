use contracts::domain::a001_opportunity::aggregate::DEFAULT_CURRENCY_SYMBOL;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_opportunity::state::OpportunityViewState;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_number_with_decimals, format_percent};

#[component]
fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] hint: Option<String>,
    icon_name: &'static str,
) -> impl IntoView {
    view! {
        <Card>
            <div class="stat-card">
                <div class="stat-card__icon">{icon(icon_name)}</div>
                <div class="stat-card__body">
                    <div class="stat-card__label">{label}</div>
                    <div class="stat-card__value">{move || value.get()}</div>
                    {hint.map(|h| view! { <div class="stat-card__hint">{h}</div> })}
                </div>
            </div>
        </Card>
    }
}

/// Counters from the loaded list plus rates from the analytics snapshot
#[component]
pub fn StatisticsCards(state: RwSignal<OpportunityViewState>) -> impl IntoView {
    let stat = move |f: fn(&OpportunityViewState) -> String| Signal::derive(move || state.with(f));

    view! {
        <div class="stat-grid">
            <StatCard
                label="Total Opportunities"
                icon_name="target"
                value=stat(|s| s.statistics.total_opportunities.to_string())
                hint="All pipeline records"
            />
            <StatCard
                label="Open"
                icon_name="trending-up"
                value=stat(|s| s.statistics.open_opportunities.to_string())
            />
            <StatCard
                label="Tender / Non-Tender"
                icon_name="building"
                value=stat(|s| {
                    format!(
                        "{} / {}",
                        s.statistics.tender_opportunities, s.statistics.non_tender_opportunities
                    )
                })
            />
            <StatCard
                label="This Month"
                icon_name="calendar"
                value=stat(|s| s.statistics.this_month_opportunities.to_string())
            />
            <StatCard
                label="Win Rate"
                icon_name="target"
                value=stat(|s| format_percent(s.statistics.win_rate))
            />
            <StatCard
                label="Pipeline Value"
                icon_name="trending-up"
                value=stat(|s| format_money(s.statistics.total_pipeline_value, DEFAULT_CURRENCY_SYMBOL))
            />
            <StatCard
                label="Avg. Deal Size"
                icon_name="target"
                value=stat(|s| format_money(s.statistics.average_deal_size, DEFAULT_CURRENCY_SYMBOL))
            />
            <StatCard
                label="Avg. Sales Cycle"
                icon_name="calendar"
                value=stat(|s| format!("{} days", format_number_with_decimals(s.statistics.average_sales_cycle, 0)))
            />
            <StatCard
                label="Qualification Rate"
                icon_name="target"
                value=stat(|s| format_percent(s.statistics.qualification_rate))
            />
        </div>
    }
}

#[component]
pub fn KpiPanel(state: RwSignal<OpportunityViewState>) -> impl IntoView {
    view! {
        <Show when=move || state.with(|s| !s.kpis.is_empty())>
            <Card>
                <h3 class="section__title">"Key Performance Indicators"</h3>
                <div class="kpi-list">
                    <For
                        each=move || state.with(|s| s.kpis.clone())
                        key=|k| k.kpi_code.clone()
                        children=move |kpi| {
                            let class = format!("kpi-list__item kpi-list__item--{}", kpi.status().css_modifier());
                            view! {
                                <div class=class>
                                    <span class="kpi-list__name">{kpi.kpi_name.clone()}</span>
                                    <span class="kpi-list__value">
                                        {format_number_with_decimals(kpi.actual_value, 1)}
                                        " / "
                                        {format_number_with_decimals(kpi.target_value, 1)}
                                    </span>
                                </div>
                            }
                        }
                    />
                </div>
            </Card>
        </Show>
    }
}

#[component]
pub fn TeamPerformancePanel(state: RwSignal<OpportunityViewState>) -> impl IntoView {
    let team = Signal::derive(move || state.with(|s| s.team_performance.clone()));

    view! {
        {move || team.get().filter(|t| !t.team_performance.is_empty()).map(|t| {
            let totals = t.team_totals.clone();
            view! {
                <Card>
                    <h3 class="section__title">"Team Performance"</h3>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Owner"</TableHeaderCell>
                                <TableHeaderCell>"Opportunities"</TableHeaderCell>
                                <TableHeaderCell>"Won"</TableHeaderCell>
                                <TableHeaderCell>"Win Rate"</TableHeaderCell>
                                <TableHeaderCell>"Pipeline"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {t.team_performance.into_iter().map(|m| view! {
                                <TableRow>
                                    <TableCell>{m.owner_name}</TableCell>
                                    <TableCell>{m.total_opportunities}</TableCell>
                                    <TableCell>{m.won_opportunities}</TableCell>
                                    <TableCell>{format_percent(m.win_rate)}</TableCell>
                                    <TableCell>{format_money(m.total_pipeline_value, DEFAULT_CURRENCY_SYMBOL)}</TableCell>
                                </TableRow>
                            }).collect_view()}
                            <TableRow>
                                <TableCell><b>"Team"</b></TableCell>
                                <TableCell>{totals.total_opportunities}</TableCell>
                                <TableCell>"-"</TableCell>
                                <TableCell>{format_percent(totals.team_win_rate)}</TableCell>
                                <TableCell>{format_money(totals.total_pipeline_value, DEFAULT_CURRENCY_SYMBOL)}</TableCell>
                            </TableRow>
                        </TableBody>
                    </Table>
                </Card>
            }
        })}
    }
}
