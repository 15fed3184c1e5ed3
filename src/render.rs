//! Render-time processing of stored comments.
//!
//! Stored markup is sanitized again before display. Whatever the submitting
//! client did, only the allow-listed vocabulary reaches the page, and the
//! spoiler transform only ever sees sanitized text.

use crate::config::EditorConfig;
use crate::sanitize::sanitize;
use crate::spoiler::convert_spoilers_with_label;

/// Sanitize stored markup and convert its spoiler markers.
///
/// ```
/// use panelmark::{EditorConfig, render_comment};
///
/// let html = render_comment("<p>he ||dies||</p>", &EditorConfig::default());
/// assert!(html.starts_with("he <span class=\"spoiler\""));
/// assert!(html.ends_with("dies</span><br>"));
/// ```
pub fn render_comment(stored_html: &str, config: &EditorConfig) -> String {
    let sanitized = sanitize(stored_html, &config.policy());
    convert_spoilers_with_label(&sanitized, &config.spoiler_label).into_owned()
}
