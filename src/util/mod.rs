use chrono::DateTime;

pub(crate) const LOGIN_PATH: &str = "/login";
pub(crate) const DASHBOARD_PATH: &str = "/dashboard";

const PREVIEW_CHARS: usize = 150;

/// Full-page navigation (also used for the OAuth hand-off).
pub(crate) fn navigate_full(href: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(href);
    }
}

pub(crate) fn redirect_to_login() {
    navigate_full(LOGIN_PATH);
}

/// Blocking browser confirmation; `false` when no window is available.
pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub(crate) fn current_fragment() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Card preview: first 150 characters, then "...".
pub(crate) fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &content[..idx]),
        None => content.to_string(),
    }
}

/// "May 2, 2024" from an RFC3339 timestamp; unparsable input is shown as-is.
pub(crate) fn format_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}
