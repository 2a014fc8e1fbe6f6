// src/views/notice.rs
use super::layout::escape_html;

/// Error banner that hides itself after `dismiss_after_ms`.
pub fn transient_error(message: &str, dismiss_after_ms: u64) -> String {
    format!(
        r#"<div class="error-message" role="status" data-dismiss-after="{ms}" style="--dismiss-after:{ms}ms"><span>⚠️</span> <span>{message}</span></div>"#,
        ms = dismiss_after_ms,
        message = escape_html(message),
    )
}

/// Alert that stays until the user acknowledges it.
pub fn blocking_alert(message: &str, acknowledge_href: &str) -> String {
    format!(
        r#"<div class="alert" role="alertdialog"><p>{message}</p><a class="alert-ok" href="{href}">OK</a></div>"#,
        message = escape_html(message),
        href = escape_html(acknowledge_href),
    )
}
