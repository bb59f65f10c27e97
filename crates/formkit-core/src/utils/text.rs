//! String utility functions.

use regex::Regex;
use std::sync::OnceLock;

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their HTML entity equivalents.
///
/// # Examples
///
/// ```
/// use formkit_core::utils::text::escape_html;
///
/// assert_eq!(escape_html("<b>\"Ana\"</b>"), "&lt;b&gt;&quot;Ana&quot;&lt;/b&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Turns a human-readable label into a string usable inside an HTML `id`.
///
/// Runs of characters other than letters, digits, `-` and `_` collapse into
/// a single `_`; leading and trailing `_` are trimmed. Case is preserved so
/// that distinct labels stay distinct.
///
/// # Examples
///
/// ```
/// use formkit_core::utils::text::id_fragment;
///
/// assert_eq!(id_fragment("Name"), "Name");
/// assert_eq!(id_fragment("Date of birth"), "Date_of_birth");
/// assert_eq!(id_fragment("  E-mail (work) "), "E-mail_work");
/// ```
pub fn id_fragment(label: &str) -> String {
    static NON_ID: OnceLock<Regex> = OnceLock::new();

    let non_id = NON_ID.get_or_init(|| Regex::new(r"[^\w-]+").unwrap());
    non_id.replace_all(label, "_").trim_matches('_').to_string()
}
