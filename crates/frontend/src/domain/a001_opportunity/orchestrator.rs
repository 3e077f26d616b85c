//! Fetch orchestration for the opportunity page.
//!
//! Every operation here is generic over the transport and the state store so
//! the same code drives the page and the tests.

use contracts::domain::a001_opportunity::analytics::AnalyticsPeriod;
use contracts::domain::a001_opportunity::aggregate::Opportunity;
use contracts::shared::master_data::MasterData;
use leptos::prelude::*;

use super::api::OpportunityApi;
use super::filter::eligible_leads;
use super::state::{NoticeLevel, OpportunityViewState};
use crate::shared::http::{ApiError, ApiTransport};

pub const NOTICE_TIMEOUT_MS: u32 = 5_000;

pub const MSG_FETCH_FAILED: &str = "Failed to fetch opportunities";
pub const MSG_FIX_VALIDATION: &str = "Please fix validation errors";
pub const MSG_CREATED: &str = "Opportunity created successfully";
pub const MSG_CREATE_FAILED: &str = "Failed to create opportunity";
pub const MSG_AUTO_CONVERT_FAILED: &str = "Failed to perform auto-conversion";

/// Where orchestration results land
pub trait ViewStore {
    fn apply(&self, f: impl FnOnce(&mut OpportunityViewState));

    fn query<R>(&self, f: impl FnOnce(&OpportunityViewState) -> R) -> R;

    /// Called after a notice is pushed; stores that show notices dismiss it later
    fn schedule_dismiss(&self, _notice_id: u64) {}
}

impl ViewStore for RwSignal<OpportunityViewState> {
    fn apply(&self, f: impl FnOnce(&mut OpportunityViewState)) {
        self.update(f);
    }

    fn query<R>(&self, f: impl FnOnce(&OpportunityViewState) -> R) -> R {
        self.with_untracked(f)
    }

    fn schedule_dismiss(&self, notice_id: u64) {
        let state = *self;
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
            state.try_update(|s| s.dismiss_notice(notice_id));
        });
    }
}

/// Pushes a notice and schedules its dismissal
pub fn notify<S: ViewStore>(store: &S, level: NoticeLevel, message: String) {
    let mut id = 0;
    store.apply(|s| id = s.push_notice(level, message));
    store.schedule_dismiss(id);
}

fn or_empty<D>(what: &str, result: Result<Vec<D>, ApiError>) -> Vec<D> {
    result.unwrap_or_else(|e| {
        log::warn!("Failed to fetch {}: {}", what, e);
        Vec::new()
    })
}

fn or_none<D>(what: &str, result: Result<Option<D>, ApiError>) -> Option<D> {
    result.unwrap_or_else(|e| {
        log::warn!("Failed to fetch {}: {}", what, e);
        None
    })
}

// ============================================================================
// Page-level reads
// ============================================================================

/// Primary read. Failure keeps the current list and tells the user.
pub async fn refresh_opportunities<T: ApiTransport, S: ViewStore>(
    api: &OpportunityApi<T>,
    store: &S,
) {
    store.apply(|s| s.set_loading(true));
    match api.list_opportunities().await {
        Ok(list) => {
            log::debug!("Loaded {} opportunities", list.len());
            store.apply(|s| s.replace_opportunities(list));
        }
        Err(e) => {
            log::error!("{}: {}", MSG_FETCH_FAILED, e);
            notify(store, NoticeLevel::Error, e.user_message(MSG_FETCH_FAILED));
        }
    }
    store.apply(|s| s.set_loading(false));
}

/// Five master-data reads joined into one update. Each failed read is an
/// empty list on its own; leads are narrowed to those still eligible
/// against the opportunities held when the batch completes.
pub async fn refresh_master_data<T: ApiTransport, S: ViewStore>(
    api: &OpportunityApi<T>,
    store: &S,
) {
    let (leads, companies, users, currencies, document_types) = futures::join!(
        api.approved_leads(),
        api.companies(),
        api.active_users(),
        api.currencies(),
        api.document_types(),
    );

    let leads = or_empty("approved leads", leads);
    let approved_leads = store.query(|s| eligible_leads(&leads, &s.opportunities));

    let master_data = MasterData {
        approved_leads,
        companies: or_empty("companies", companies),
        users: or_empty("active users", users),
        currencies: or_empty("currencies", currencies),
        document_types: or_empty("document types", document_types),
    };
    log::debug!(
        "Loaded master data: {} eligible leads, {} companies, {} users",
        master_data.approved_leads.len(),
        master_data.companies.len(),
        master_data.users.len()
    );
    store.apply(|s| s.replace_master_data(master_data));
}

pub async fn refresh_analytics<T: ApiTransport, S: ViewStore>(
    api: &OpportunityApi<T>,
    store: &S,
    period: AnalyticsPeriod,
) {
    let analytics = or_none("analytics", api.analytics(period).await);
    store.apply(|s| s.replace_analytics(analytics));
}

pub async fn refresh_kpis<T: ApiTransport, S: ViewStore>(api: &OpportunityApi<T>, store: &S) {
    let kpis = or_empty("KPIs", api.kpis().await);
    store.apply(|s| s.replace_kpis(kpis));
}

pub async fn refresh_team_performance<T: ApiTransport, S: ViewStore>(
    api: &OpportunityApi<T>,
    store: &S,
) {
    let team = or_none("team performance", api.team_performance().await);
    store.apply(|s| s.replace_team_performance(team));
}

/// Initial load of the page. Master data waits for the opportunity list so
/// lead eligibility is computed against it; the optional reads run alongside.
pub async fn load_all<T: ApiTransport, S: ViewStore>(
    api: &OpportunityApi<T>,
    store: &S,
    period: AnalyticsPeriod,
) {
    futures::join!(
        async {
            refresh_opportunities(api, store).await;
            refresh_master_data(api, store).await;
        },
        refresh_analytics(api, store, period),
        refresh_kpis(api, store),
        refresh_team_performance(api, store),
    );
}

// ============================================================================
// View dialog
// ============================================================================

/// Opens the view dialog and loads its detail slices.
///
/// Every slice is fetched concurrently and tolerates failure on its own.
/// Results for a dialog that was closed or replaced in the meantime are dropped.
pub async fn open_opportunity<T: ApiTransport, S: ViewStore>(
    api: &OpportunityApi<T>,
    store: &S,
    opportunity: Opportunity,
) {
    let id = opportunity.id.clone();
    let is_tender = opportunity.is_tender();
    let mut generation = 0;
    store.apply(|s| generation = s.open_view(opportunity));

    let (rules, status, history, documents, clauses, dates, won, order) = futures::join!(
        api.qualification_rules(&id),
        api.qualification_status(&id),
        api.stage_history(&id),
        api.documents(&id),
        api.clauses(&id),
        async {
            if is_tender {
                api.important_dates(&id).await
            } else {
                Ok(Vec::new())
            }
        },
        api.won_details(&id),
        api.order_analysis(&id),
    );

    let mut applied = false;
    store.apply(|s| {
        applied = s.apply_details(generation, |d| {
            d.qualification_rules = or_empty("qualification rules", rules);
            d.qualification_status = or_none("qualification status", status);
            d.stage_history = or_empty("stage history", history);
            d.documents = or_empty("documents", documents);
            d.clauses = or_empty("clauses", clauses);
            d.important_dates = or_empty("important dates", dates);
            d.won_details = or_none("won details", won);
            d.order_analysis = or_none("order analysis", order);
        });
    });
    if !applied {
        log::debug!("Dropped details of opportunity {} for a closed dialog", id);
    }
}

// ============================================================================
// Writes
// ============================================================================

/// Validates and submits the create form.
///
/// Returns `true` when the opportunity was created.
pub async fn submit_create<T: ApiTransport, S: ViewStore>(
    api: &OpportunityApi<T>,
    store: &S,
    period: AnalyticsPeriod,
) -> bool {
    let mut submission = None;
    store.apply(|s| submission = s.begin_submit());
    let dto = match submission {
        Some(Ok(dto)) => dto,
        Some(Err(errors)) => {
            log::debug!("Create form rejected: {} field(s) missing", errors.len());
            notify(store, NoticeLevel::Error, MSG_FIX_VALIDATION.to_string());
            return false;
        }
        None => return false,
    };

    match api.create_opportunity(&dto).await {
        Ok(created) => {
            log::info!(
                "Created opportunity {}",
                created
                    .as_ref()
                    .and_then(|c| c.opportunity_id.as_deref())
                    .unwrap_or("<unknown>")
            );
            store.apply(|s| s.submit_succeeded());
            notify(store, NoticeLevel::Success, MSG_CREATED.to_string());

            refresh_opportunities(api, store).await;
            futures::join!(
                refresh_master_data(api, store),
                refresh_analytics(api, store, period),
                refresh_kpis(api, store),
            );
            true
        }
        Err(e) => {
            log::error!("{}: {}", MSG_CREATE_FAILED, e);
            store.apply(|s| s.submit_failed());
            notify(store, NoticeLevel::Error, e.user_message(MSG_CREATE_FAILED));
            false
        }
    }
}

pub async fn run_auto_conversion<T: ApiTransport, S: ViewStore>(
    api: &OpportunityApi<T>,
    store: &S,
    period: AnalyticsPeriod,
) {
    store.apply(|s| s.set_converting(true));
    match api.auto_convert().await {
        Ok(result) => {
            notify(
                store,
                NoticeLevel::Success,
                format!(
                    "Auto-conversion completed. {} leads converted to opportunities.",
                    result.converted_count
                ),
            );
            refresh_opportunities(api, store).await;
            futures::join!(
                refresh_master_data(api, store),
                refresh_analytics(api, store, period),
            );
        }
        Err(e) => {
            log::error!("{}: {}", MSG_AUTO_CONVERT_FAILED, e);
            notify(store, NoticeLevel::Error, e.user_message(MSG_AUTO_CONVERT_FAILED));
        }
    }
    store.apply(|s| s.set_converting(false));
}
