//! `||spoiler||` markers.
//!
//! Comment authors hide content between paired `||` delimiters. The
//! transform runs on already-sanitized markup right before rendering, so the
//! delimiters are plain text by then and the enclosed markup is trusted.
//!
//! The emitted element is focusable and announced as a button. Consumers
//! attach click and keyboard handlers that toggle [`REVEALED_CLASS`] on
//! elements carrying [`SPOILER_CLASS`].

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::escape_attr;

/// Class carried by spoiler elements.
pub const SPOILER_CLASS: &str = "spoiler";

/// Class consumers add to a spoiler once it has been revealed.
pub const REVEALED_CLASS: &str = "revealed";

/// Accessible label used when none is configured.
pub const DEFAULT_SPOILER_LABEL: &str = "Hidden content";

/// Non-greedy, so adjacent pairs match independently.
static SPOILER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\|\|(.+?)\|\|").expect("valid spoiler pattern"));

/// Replace every `||...||` pair with a spoiler element.
///
/// An unpaired `||` is left as literal text.
///
/// ```
/// use panelmark::convert_spoilers;
///
/// assert_eq!(
///     convert_spoilers("a||b||c"),
///     r#"a<span class="spoiler" tabindex="0" role="button" aria-label="Hidden content">b</span>c"#
/// );
/// assert_eq!(convert_spoilers("a||b"), "a||b");
/// ```
pub fn convert_spoilers(html: &str) -> Cow<'_, str> {
    convert_spoilers_with_label(html, DEFAULT_SPOILER_LABEL)
}

/// [`convert_spoilers`] with a custom accessible label.
pub fn convert_spoilers_with_label<'a>(html: &'a str, label: &str) -> Cow<'a, str> {
    let label = escape_attr(label);
    SPOILER.replace_all(html, |caps: &Captures<'_>| {
        format!(
            r#"<span class="{SPOILER_CLASS}" tabindex="0" role="button" aria-label="{label}">{}</span>"#,
            &caps[1]
        )
    })
}
