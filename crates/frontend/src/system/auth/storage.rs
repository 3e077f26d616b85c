use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "access_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_item(ACCESS_TOKEN_KEY)
}

/// Read a raw localStorage value
pub fn get_item(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}
