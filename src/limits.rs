//! Character and line limits for editable comment surfaces.
//!
//! Limits are a typing affordance, not a security boundary: content is
//! clipped silently and always to a prefix of what was typed or pasted.
//! Lines are clipped first, then characters.

use serde::{Deserialize, Serialize};

use crate::text::{TextStats, html_to_plain_text, plain_text_to_html};

/// Maximum size of an editor's content. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_chars: Option<usize>,
    pub max_lines: Option<usize>,
}

impl Limits {
    pub fn new(max_chars: Option<usize>, max_lines: Option<usize>) -> Self {
        Self {
            max_chars,
            max_lines,
        }
    }

    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_chars.is_none() && self.max_lines.is_none()
    }

    pub fn is_exceeded(&self, stats: &TextStats) -> bool {
        self.max_chars.is_some_and(|max| stats.chars > max)
            || self.max_lines.is_some_and(|max| stats.lines > max)
    }

    /// Whether another character would exceed the character cap.
    pub fn chars_full(&self, stats: &TextStats) -> bool {
        self.max_chars.is_some_and(|max| stats.chars >= max)
    }

    /// Whether another line would exceed the line cap.
    pub fn lines_full(&self, stats: &TextStats) -> bool {
        self.max_lines.is_some_and(|max| stats.lines >= max)
    }

    /// What may still be inserted into content measuring `current`.
    pub fn budget(&self, current: &TextStats) -> Budget {
        if self.max_lines == Some(0) {
            return Budget {
                chars: Some(0),
                newlines: Some(0),
            };
        }
        Budget {
            chars: self.max_chars.map(|max| max.saturating_sub(current.chars)),
            // Text typed into an empty surface starts the first line.
            newlines: self
                .max_lines
                .map(|max| max.saturating_sub(current.lines.max(1))),
        }
    }

    /// Clip plain text to these limits.
    ///
    /// ```
    /// use panelmark::Limits;
    ///
    /// let limits = Limits::new(Some(10), Some(2));
    /// assert_eq!(limits.clip("hello\nworld\nextra"), "hello\nworl");
    /// ```
    pub fn clip<'a>(&self, text: &'a str) -> &'a str {
        self.budget(&TextStats::default()).clip(text)
    }
}

/// Remaining room in an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub chars: Option<usize>,
    /// Additional line breaks allowed.
    pub newlines: Option<usize>,
}

impl Budget {
    pub fn is_exhausted(&self) -> bool {
        self.chars == Some(0)
    }

    /// Whether content measuring `stats` can be inserted whole.
    pub fn fits(&self, stats: &TextStats) -> bool {
        self.chars.is_none_or(|max| stats.chars <= max)
            && self
                .newlines
                .is_none_or(|max| stats.lines.saturating_sub(1) <= max)
    }

    /// Longest prefix of `text` that fits.
    pub fn clip<'a>(&self, text: &'a str) -> &'a str {
        let mut end = text.len();
        if let Some(newlines) = self.newlines
            && let Some((idx, _)) = text.match_indices('\n').nth(newlines)
        {
            end = idx;
        }
        let text = &text[..end];

        if let Some(chars) = self.chars
            && let Some((idx, _)) = text.char_indices().nth(chars)
        {
            return &text[..idx];
        }
        text
    }
}

/// Result of enforcing limits on editor markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enforced {
    pub html: String,
    pub stats: TextStats,
    pub truncated: bool,
}

/// Enforce `limits` on sanitized markup.
///
/// Content within the limits is returned untouched. Content over the limits is
/// rebuilt from its clipped plain text, which drops inline formatting.
pub fn enforce(html: &str, limits: &Limits) -> Enforced {
    let text = html_to_plain_text(html);
    let stats = TextStats::of_text(&text);
    if !limits.is_exceeded(&stats) {
        return Enforced {
            html: html.to_string(),
            stats,
            truncated: false,
        };
    }

    let clipped = limits.clip(&text);
    let clipped_stats = TextStats::of_text(clipped);
    tracing::debug!(
        chars = stats.chars,
        lines = stats.lines,
        kept_chars = clipped_stats.chars,
        kept_lines = clipped_stats.lines,
        "truncated content over limit"
    );
    Enforced {
        html: plain_text_to_html(clipped),
        stats: clipped_stats,
        truncated: true,
    }
}

/// Clip pasted plain text to the room left in `current_html`.
///
/// Returns `None` when nothing can be inserted, making the paste a no-op.
pub fn clip_paste(current_html: &str, pasted: &str, limits: &Limits) -> Option<String> {
    let budget = limits.budget(&TextStats::of_html(current_html));
    if budget.is_exhausted() {
        tracing::debug!("paste ignored: editor is full");
        return None;
    }

    let pasted = normalize_newlines(pasted);
    let clipped = budget.clip(&pasted);
    if clipped.len() < pasted.len() {
        tracing::debug!(
            pasted = pasted.chars().count(),
            kept = clipped.chars().count(),
            "clipped paste to remaining budget"
        );
    }
    (!clipped.is_empty()).then(|| clipped.to_string())
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// A keystroke as seen by the limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// A printable character.
    Char(char),
    /// Enter. `submit_shortcut` is set for the explicit submit chord.
    Enter { submit_shortcut: bool },
    /// Navigation, deletion, modifiers and everything else.
    Other,
}

/// Whether `key` should be suppressed given the current content.
pub fn should_suppress_key(current_html: &str, key: KeyPress, limits: &Limits) -> bool {
    if limits.is_unlimited() {
        return false;
    }
    match key {
        KeyPress::Char(c) if !c.is_control() => {
            limits.max_lines == Some(0) || limits.chars_full(&TextStats::of_html(current_html))
        }
        KeyPress::Enter {
            submit_shortcut: false,
        } => limits.lines_full(&TextStats::of_html(current_html)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_lines_then_chars() {
        let limits = Limits::new(Some(10), Some(2));
        let clipped = limits.clip("hello\nworld\nextra");
        assert_eq!(clipped, "hello\nworl");
        assert!(TextStats::of_text(clipped).lines <= 2);
        assert!(TextStats::of_text(clipped).chars <= 10);
    }

    #[test]
    fn test_clip_unlimited_is_identity() {
        let text = "a\nb\nc";
        assert_eq!(Limits::unlimited().clip(text), text);
    }

    #[test]
    fn test_clip_respects_char_boundaries() {
        let limits = Limits::new(Some(3), None);
        assert_eq!(limits.clip("進撃の巨人"), "進撃の");
    }

    #[test]
    fn test_zero_lines_allows_nothing() {
        let limits = Limits::new(None, Some(0));
        assert_eq!(limits.clip("anything"), "");
    }

    #[test]
    fn test_budget_for_empty_surface() {
        let limits = Limits::new(Some(20), Some(3));
        let budget = limits.budget(&TextStats::default());
        assert_eq!(budget.chars, Some(20));
        assert_eq!(budget.newlines, Some(2));
    }

    #[test]
    fn test_budget_partially_used() {
        let limits = Limits::new(Some(20), Some(3));
        let budget = limits.budget(&TextStats { chars: 15, lines: 3 });
        assert_eq!(budget.chars, Some(5));
        assert_eq!(budget.newlines, Some(0));
        assert_eq!(budget.clip("ab\ncd"), "ab");
    }

    #[test]
    fn test_enforce_within_limits_untouched() {
        let limits = Limits::new(Some(100), Some(5));
        let enforced = enforce("<b>short</b>", &limits);
        assert!(!enforced.truncated);
        assert_eq!(enforced.html, "<b>short</b>");
    }

    #[test]
    fn test_enforce_over_limit_rebuilds_from_text() {
        let limits = Limits::new(Some(8), Some(2));
        let enforced = enforce("<b>one</b><br>two<br>three", &limits);
        assert!(enforced.truncated);
        assert_eq!(enforced.html, "one<br>two");
        assert_eq!(enforced.stats, TextStats { chars: 7, lines: 2 });
    }

    #[test]
    fn test_clip_paste_into_full_editor() {
        let limits = Limits::new(Some(5), None);
        assert_eq!(clip_paste("12345", "more", &limits), None);
    }

    #[test]
    fn test_clip_paste_partial() {
        let limits = Limits::new(Some(10), Some(2));
        assert_eq!(
            clip_paste("", "hello\nworld\nextra", &limits).as_deref(),
            Some("hello\nworl")
        );
        assert_eq!(clip_paste("abc", "defghijkl", &limits).as_deref(), Some("defghij"));
    }

    #[test]
    fn test_clip_paste_normalizes_crlf() {
        let limits = Limits::new(None, Some(2));
        assert_eq!(clip_paste("", "a\r\nb\r\nc", &limits).as_deref(), Some("a\nb"));
    }

    #[test]
    fn test_suppress_keys_at_caps() {
        let limits = Limits::new(Some(3), Some(1));
        assert!(should_suppress_key("abc", KeyPress::Char('d'), &limits));
        assert!(!should_suppress_key("ab", KeyPress::Char('c'), &limits));
        assert!(should_suppress_key(
            "ab",
            KeyPress::Enter {
                submit_shortcut: false
            },
            &limits
        ));
        assert!(!should_suppress_key(
            "ab",
            KeyPress::Enter {
                submit_shortcut: true
            },
            &limits
        ));
        assert!(!should_suppress_key("abc", KeyPress::Other, &limits));
    }

    #[test]
    fn test_zero_lines_suppresses_typing() {
        let limits = Limits::new(None, Some(0));
        assert!(should_suppress_key("", KeyPress::Char('a'), &limits));
        assert_eq!(clip_paste("", "text", &limits), None);
    }
}
