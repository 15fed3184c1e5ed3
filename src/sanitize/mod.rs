//! Allow-list filtering of comment markup.
//!
//! [`sanitize`] parses untrusted HTML and rebuilds it from a closed tag
//! vocabulary. Elements outside the vocabulary are unwrapped: their tags and
//! attributes are discarded and their content is kept in place. A small set of
//! elements whose content is never meant to be shown (`script`, `style`,
//! `template`, ...) is removed together with its content.
//!
//! The pipeline has no error path. html5ever repairs any input into a tree,
//! and the filter only ever emits tags it names itself.
//!
//! ## Variants
//!
//! - [`AllowList::Base`]: `b, i, u, s, br, strong, em`. Styled `span`s
//!   become the equivalent semantic tags.
//! - [`AllowList::Extended`]: base plus `span, details, summary, div`.
//!   Styled `span`s keep a reconstructed `style`, `details` keeps a
//!   `spoiler` class, and block-level elements fold into a trailing `<br>`.

mod style;
mod walk;

pub use style::SpanStyle;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dom::parse_fragment;

/// Runs of three or more `<br>` separated only by whitespace.
static BR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br>(?:\s*<br>){2,}").expect("valid br-run pattern"));

/// Tag vocabulary a surface accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllowList {
    Base,
    #[default]
    Extended,
}

const BASE_TAGS: &[&str] = &["b", "i", "u", "s", "br", "strong", "em"];

const EXTENDED_TAGS: &[&str] = &[
    "b", "i", "u", "s", "br", "strong", "em", "span", "details", "summary", "div",
];

impl AllowList {
    /// Every tag name this variant can emit.
    pub fn tags(self) -> &'static [&'static str] {
        match self {
            AllowList::Base => BASE_TAGS,
            AllowList::Extended => EXTENDED_TAGS,
        }
    }

    pub fn allows(self, tag: &str) -> bool {
        self.tags().contains(&tag)
    }
}

/// Sanitizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub allow_list: AllowList,
    /// Replace block-level elements with their content followed by `<br>`.
    pub fold_blocks: bool,
}

impl Policy {
    /// Policy with the block handling that belongs to `allow_list`.
    pub fn new(allow_list: AllowList) -> Self {
        Self {
            allow_list,
            fold_blocks: allow_list == AllowList::Extended,
        }
    }

    pub fn base() -> Self {
        Self::new(AllowList::Base)
    }

    pub fn extended() -> Self {
        Self::new(AllowList::Extended)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new(AllowList::default())
    }
}

/// Sanitize untrusted HTML against `policy`.
///
/// # Examples
///
/// ```
/// use panelmark::{Policy, sanitize};
///
/// let html = r#"<div onclick="evil()">hi<script>bad()</script></div>"#;
/// assert_eq!(sanitize(html, &Policy::extended()), "hi<br>");
///
/// assert_eq!(sanitize("<del>x</del>", &Policy::base()), "<s>x</s>");
/// ```
pub fn sanitize(html: &str, policy: &Policy) -> String {
    let fragment = parse_fragment(html);
    let raw = walk::write_fragment(&fragment, policy);
    let output = finish(&raw);

    tracing::trace!(
        input_len = html.len(),
        output_len = output.len(),
        allow_list = ?policy.allow_list,
        "sanitized markup"
    );
    output
}

/// Sanitize with the base vocabulary.
pub fn sanitize_basic(html: &str) -> String {
    sanitize(html, &Policy::base())
}

/// Sanitize with the extended comment vocabulary.
pub fn sanitize_comment(html: &str) -> String {
    sanitize(html, &Policy::extended())
}

/// Post-processing on the serialized output.
fn finish(raw: &str) -> String {
    let collapsed = BR_RUN.replace_all(raw, "<br><br>");
    collapsed.trim().to_string()
}
