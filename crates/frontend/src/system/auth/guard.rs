use leptos::prelude::*;
use std::sync::Arc;

use super::storage;

pub const PERMISSION_CREATE: &str = "create";
pub const PERMISSION_EDIT: &str = "edit";

/// Capability check supplied by the host application.
///
/// The gate only asks "may this user do `permission` on `resource`"; how the
/// answer is produced is up to whoever provides the checker.
#[derive(Clone)]
pub struct PermissionChecker(Arc<dyn Fn(&str, &str) -> bool + Send + Sync>);

impl PermissionChecker {
    pub fn new(check: impl Fn(&str, &str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(check))
    }

    /// Grants every pair while an access token is stored; the backend enforces the real rules
    pub fn authenticated() -> Self {
        Self::new(|_, _| storage::get_access_token().is_some())
    }

    pub fn allows(&self, permission: &str, resource: &str) -> bool {
        (self.0)(permission, resource)
    }
}

/// Renders children only when the `PermissionChecker` in context grants
/// `(permission, resource)`. Without a checker nothing is rendered.
#[component]
pub fn PermissionGate(
    #[prop(into)] permission: String,
    #[prop(into)] resource: String,
    children: ChildrenFn,
) -> impl IntoView {
    let allowed = use_context::<PermissionChecker>()
        .map(|checker| checker.allows(&permission, &resource))
        .unwrap_or(false);

    view! {
        <Show when=move || allowed>
            {children()}
        </Show>
    }
}
