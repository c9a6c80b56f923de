//! Plain-text fallback for templates that fail to render.
//!
//! When rendering fails, the raw template source is still shown to the user,
//! after removing the one directive that is purely cosmetic: `{{ Bold "..." }}`
//! becomes its literal text. Every other directive is left exactly as written,
//! since dropping it would lose information.

use once_cell::sync::Lazy;
use regex::Regex;

/// `{{ Bold "<literal>" }}` with single spaces and a non-empty literal that
/// contains no double quote.
static BOLD_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{\{ Bold "([^"]+)" \}\}"#).expect("valid bold directive pattern")
});

/// Replaces every `{{ Bold "text" }}` in `template` with `text`.
///
/// Never fails. A template without matches is returned unchanged.
///
/// # Example
///
/// ```rust
/// use etime_render::sanitize;
///
/// assert_eq!(sanitize("{{ Bold \"USAGE\" }}\n  {{ CommandName }}"), "USAGE\n  {{ CommandName }}");
/// assert_eq!(sanitize("{{ Bold }}"), "{{ Bold }}");
/// ```
pub fn sanitize(template: &str) -> String {
    BOLD_DIRECTIVE.replace_all(template, "${1}").into_owned()
}
