use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_opportunity::state::{NoticeLevel, OpportunityViewState};
use crate::shared::icons::icon;

fn intent(level: NoticeLevel) -> MessageBarIntent {
    match level {
        NoticeLevel::Success => MessageBarIntent::Success,
        NoticeLevel::Error => MessageBarIntent::Error,
        NoticeLevel::Info => MessageBarIntent::Info,
    }
}

/// Transient notices, newest last; each can also be closed by hand
#[component]
pub fn NoticeStack(state: RwSignal<OpportunityViewState>) -> impl IntoView {
    view! {
        <div class="notice-stack">
            <For
                each=move || state.with(|s| s.notices.clone())
                key=|n| n.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <MessageBar intent=intent(notice.level)>
                            <div class="notice-stack__item">
                                <span>{notice.message}</span>
                                <button
                                    class="button button--icon"
                                    on:click=move |_| state.update(|s| s.dismiss_notice(id))
                                >
                                    {icon("x")}
                                </button>
                            </div>
                        </MessageBar>
                    }
                }
            />
        </div>
    }
}
