use crate::domain::a001_opportunity::ui::list::OpportunityList;
use crate::system::auth::guard::PermissionChecker;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Privileged actions are gated on this checker
    provide_context(PermissionChecker::authenticated());

    view! {
        <OpportunityList />
    }
}
