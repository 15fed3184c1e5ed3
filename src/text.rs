//! Plain-text projection of sanitized markup.
//!
//! The projection is what length and line limits are measured against. It is
//! never displayed: `<br>` becomes `\n`, every other tag disappears, and
//! non-breaking spaces count as ordinary spaces.

use crate::dom::{NodeData, parse_fragment};
use crate::escape::escape_text;

/// Character and line counts of a plain-text projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub chars: usize,
    pub lines: usize,
}

impl TextStats {
    pub fn of_text(text: &str) -> Self {
        Self {
            chars: count_chars(text),
            lines: count_lines(text),
        }
    }

    pub fn of_html(html: &str) -> Self {
        Self::of_text(&html_to_plain_text(html))
    }
}

/// Project markup to plain text.
///
/// ```
/// use panelmark::html_to_plain_text;
///
/// assert_eq!(html_to_plain_text("<b>one</b><br>two&nbsp;three"), "one\ntwo three");
/// ```
pub fn html_to_plain_text(html: &str) -> String {
    let fragment = parse_fragment(html);
    let dom = fragment.dom();
    let mut text = String::with_capacity(html.len());

    let mut stack: Vec<_> = fragment.children().collect();
    stack.reverse();
    while let Some(id) = stack.pop() {
        let Some(node) = dom.get(id) else {
            continue;
        };
        match &node.data {
            NodeData::Text(t) => text.push_str(t),
            NodeData::Element { name, .. } if name.local.as_ref() == "br" => text.push('\n'),
            NodeData::Element { .. } => {
                let mark = stack.len();
                stack.extend(dom.children(id));
                stack[mark..].reverse();
            }
            NodeData::Document | NodeData::Ignored => {}
        }
    }

    if text.contains('\u{a0}') {
        text = text.replace('\u{a0}', " ");
    }
    text
}

/// Number of characters, counted as Unicode scalar values.
pub fn count_chars(text: &str) -> usize {
    text.chars().count()
}

/// Number of lines: zero for empty text, otherwise one more than the newlines.
pub fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        1 + text.matches('\n').count()
    }
}

/// Rebuild markup from plain text, joining lines with `<br>`.
pub fn plain_text_to_html(text: &str) -> String {
    text.split('\n')
        .map(escape_text)
        .collect::<Vec<_>>()
        .join("<br>")
}
