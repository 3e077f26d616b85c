//! API utilities for frontend-backend communication

/// Port the CRM backend listens on when no URL is configured
pub const DEFAULT_BACKEND_PORT: u16 = 8001;

/// Get the default base URL for API requests
///
/// Constructs the URL from the current window location, using port 8001 for
/// the backend server. Falls back to `http://localhost:8001` without a window.
///
/// # Example
/// ```ignore
/// let url = format!("{}/api/opportunities", api_base());
/// ```
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return format!("http://localhost:{}", DEFAULT_BACKEND_PORT),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "localhost".to_string());
    format!("{}//{}:{}", protocol, hostname, DEFAULT_BACKEND_PORT)
}
