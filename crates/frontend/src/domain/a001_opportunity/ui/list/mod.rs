pub mod stats;
pub mod view_model;

use self::stats::{KpiPanel, StatisticsCards, TeamPerformancePanel};
use self::view_model::OpportunityListViewModel;
use crate::domain::a001_opportunity::ui::create::CreateOpportunityDialog;
use crate::domain::a001_opportunity::ui::details::OpportunityDetailsDialog;
use crate::domain::a001_opportunity::ui::notices::NoticeStack;
use crate::shared::config::FrontendConfig;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator, highlight_matches, Searchable};
use crate::shared::number_format::format_money;
use crate::system::auth::guard::{PermissionGate, PERMISSION_CREATE, PERMISSION_EDIT};
use contracts::domain::a001_opportunity::aggregate::Opportunity;
use leptos::prelude::*;
use thaw::*;

pub const OPPORTUNITY_RESOURCE: &str = "/opportunities";

const MSG_EDIT_IN_VIEW: &str = "Edit functionality available in comprehensive view dialog";

const COLUMNS: [(&str, &str); 10] = [
    ("opportunity_id", "ID"),
    ("sr_no", "SR No"),
    ("opportunity_title", "Title"),
    ("company_name", "Company"),
    ("opportunity_type", "Type"),
    ("current_stage_name", "Stage"),
    ("expected_revenue", "Expected Revenue"),
    ("state", "State"),
    ("owner_name", "Owner"),
    ("created_at", "Created"),
];

#[component]
#[allow(non_snake_case)]
pub fn OpportunityList() -> impl IntoView {
    let config = FrontendConfig::load();
    let vm = OpportunityListViewModel::new(&config);
    let state = vm.state;
    let busy = vm.is_busy();

    vm.load_all();

    let search_query = RwSignal::new(String::new());
    Effect::new(move || {
        let v = search_query.get();
        untrack(move || {
            state.update(|s| s.set_search_term(v));
        });
    });

    let toggle_sort = move |field: &'static str| state.update(|s| s.toggle_sort(field));

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Opportunity Management"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        {move || state.with(|s| s.opportunities.len().to_string())}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Flex gap=FlexGap::Small>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.load_all()
                            disabled=busy
                        >
                            {icon("refresh")}
                            {move || if state.with(|s| s.loading) { "Loading..." } else { "Refresh" }}
                        </Button>
                        <PermissionGate permission=PERMISSION_CREATE resource=OPPORTUNITY_RESOURCE>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| vm.auto_convert()
                                disabled=busy
                            >
                                {icon("zap")}
                                {move || if state.with(|s| s.converting) { "Converting..." } else { "Auto-Convert Leads" }}
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| state.update(|s| s.open_form())
                            >
                                {icon("plus")}
                                "Create Opportunity"
                            </Button>
                        </PermissionGate>
                    </Flex>
                </div>
            </div>

            <NoticeStack state=state />

            <div class="page__content">
                <StatisticsCards state=state />
                <KpiPanel state=state />
                <TeamPerformancePanel state=state />

                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        {icon("search")}
                        <div style="flex: 1; max-width: 420px;">
                            <Input
                                value=search_query
                                placeholder="Search by title, opportunity ID or company..."
                            />
                        </div>
                    </Flex>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1100px;">
                        <TableHeader>
                            <TableRow>
                                {COLUMNS.into_iter().map(|(field, label)| view! {
                                    <TableHeaderCell>
                                        <div class="table__sortable-header" style="cursor: pointer;" on:click=move |_| toggle_sort(field)>
                                            {label}
                                            <span class=move || state.with(|s| get_sort_class(&s.sort_field, field))>
                                                {move || state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))}
                                            </span>
                                        </div>
                                    </TableHeaderCell>
                                }).collect_view()}
                                <TableHeaderCell>"Actions"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let (rows, term) = state.with(|s| (s.visible_opportunities(), s.search_term.clone()));
                                if rows.is_empty() {
                                    let message = if state.with(|s| s.loading) {
                                        "Loading opportunities..."
                                    } else if term.is_empty() {
                                        "No opportunities yet"
                                    } else {
                                        "No opportunities match the search"
                                    };
                                    return view! {
                                        <TableRow>
                                            <TableCell attr:colspan="11">
                                                <div class="table__empty">{message}</div>
                                            </TableCell>
                                        </TableRow>
                                    }.into_any();
                                }
                                rows.into_iter()
                                    .map(|row| view! { <OpportunityRow row=row term=term.clone() vm=vm /> })
                                    .collect_view()
                                    .into_any()
                            }}
                        </TableBody>
                    </Table>
                </div>
            </div>

            <Show when=move || state.with(|s| s.form.is_open())>
                <CreateOpportunityDialog vm=vm />
            </Show>
            <Show when=move || state.with(|s| s.view.is_some())>
                <OpportunityDetailsDialog state=state />
            </Show>
        </div>
    }
}

#[component]
fn OpportunityRow(row: Opportunity, term: String, vm: OpportunityListViewModel) -> impl IntoView {
    let title = row.get_field_value("opportunity_title").unwrap_or_default();
    let code = row.get_field_value("opportunity_id").unwrap_or_default();
    let company = row.get_field_value("company_name").unwrap_or_default();
    let revenue = row
        .expected_revenue
        .map(|v| format_money(v, row.currency_symbol_or_default()))
        .unwrap_or_else(|| "-".to_string());
    let state_class = if row.is_open() {
        "status-badge status-badge--open"
    } else {
        "status-badge status-badge--closed"
    };
    let type_color = if row.is_tender() {
        BadgeColor::Brand
    } else {
        BadgeColor::Informative
    };
    let created = format_date(&row.created_at);
    let sr_no = row.sr_no.map(|n| format!("#{}", n)).unwrap_or_default();
    let code_cell = highlight_matches(&code, &term);
    let title_cell = highlight_matches(&title, &term);
    let company_cell = highlight_matches(&company, &term);
    let auto_converted = row.auto_converted;
    let opportunity_type = row.opportunity_type.clone();
    let stage_code = row.current_stage_code.clone();
    let stage_name = row.current_stage_name.clone();
    let state = row.state.clone();
    let owner_name = row.owner_name.clone();
    let open_details = move |_: leptos::ev::MouseEvent| vm.open_details(row.clone());

    view! {
        <TableRow>
            <TableCell>
                <TableCellLayout>
                    <span class="table__code">{code_cell}</span>
                    {auto_converted.then(|| view! {
                        <span class="table__tag" title="Auto-converted">{icon("zap")}</span>
                    })}
                </TableCellLayout>
            </TableCell>
            <TableCell>{sr_no}</TableCell>
            <TableCell>
                <TableCellLayout truncate=true>{title_cell}</TableCellLayout>
            </TableCell>
            <TableCell>{company_cell}</TableCell>
            <TableCell>
                <Badge appearance=BadgeAppearance::Tint color=type_color>
                    {opportunity_type}
                </Badge>
            </TableCell>
            <TableCell>
                <span class="table__muted">{stage_code}</span>
                " "
                {stage_name}
            </TableCell>
            <TableCell>{revenue}</TableCell>
            <TableCell><span class=state_class>{state}</span></TableCell>
            <TableCell>{owner_name}</TableCell>
            <TableCell>{created}</TableCell>
            <TableCell>
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=open_details
                    >
                        {icon("eye")}
                    </Button>
                    <PermissionGate permission=PERMISSION_EDIT resource=OPPORTUNITY_RESOURCE>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            size=ButtonSize::Small
                            on_click=move |_| vm.notify_info(MSG_EDIT_IN_VIEW)
                        >
                            {icon("edit")}
                        </Button>
                    </PermissionGate>
                </Flex>
            </TableCell>
        </TableRow>
    }
}
