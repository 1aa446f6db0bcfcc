//! HTML escaping for provider-supplied text.
//!
//! Everything the API returns is untrusted. Renderers pass each value through
//! [`escape_html`] before interpolating it into markup, attribute values
//! included.

/// Escape the five HTML-reserved characters.
///
/// `&` is replaced first so the entities introduced by the later
/// substitutions are not escaped a second time.
pub fn escape_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// [`escape_html`] for optional fields; absent maps to the empty string.
pub fn escape_opt(text: Option<&str>) -> String {
    text.map(escape_html).unwrap_or_default()
}
