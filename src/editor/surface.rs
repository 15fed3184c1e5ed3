//! The editable region an [`Editor`](super::Editor) drives.
//!
//! In a browser this is a contentEditable element manipulated through DOM
//! calls. The trait keeps that behind one seam so the editor logic stays pure;
//! [`MemorySurface`] is the in-process implementation.

use crate::text::plain_text_to_html;

/// Inline formatting commands offered by the comment toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    /// Wraps input in `||` markers.
    Spoiler,
}

impl Format {
    fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Format::Bold => ("<b>", "</b>"),
            Format::Italic => ("<i>", "</i>"),
            Format::Underline => ("<u>", "</u>"),
            Format::Strikethrough => ("<s>", "</s>"),
            Format::Spoiler => ("||", "||"),
        }
    }
}

/// A rich-text editing surface.
pub trait RichTextSurface {
    /// Current markup of the surface.
    fn content(&self) -> String;

    /// Replace the whole content.
    fn set_content(&mut self, html: &str);

    /// Insert markup at the caret.
    fn insert_html(&mut self, html: &str);

    /// Insert plain text at the caret. Newlines become line breaks.
    fn insert_text(&mut self, text: &str) {
        self.insert_html(&plain_text_to_html(text));
    }

    /// Toggle a formatting command for subsequent input.
    fn apply_format(&mut self, format: Format);

    fn clear(&mut self) {
        self.set_content("");
    }
}

/// In-memory surface with the caret fixed at the end of the content.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    html: String,
    active: Vec<Format>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            active: Vec::new(),
        }
    }

    /// Formats applied to the next insertion, in the order they were toggled.
    pub fn active_formats(&self) -> &[Format] {
        &self.active
    }

    /// Simulate typing: insert text as a keystroke stream would.
    pub fn type_text(&mut self, text: &str) {
        self.insert_text(text);
    }

    fn wrap(&self, html: &str) -> String {
        let mut wrapped = html.to_string();
        for format in self.active.iter().rev() {
            let (open, close) = format.delimiters();
            wrapped = format!("{open}{wrapped}{close}");
        }
        wrapped
    }
}

impl RichTextSurface for MemorySurface {
    fn content(&self) -> String {
        self.html.clone()
    }

    fn set_content(&mut self, html: &str) {
        self.html = html.to_string();
    }

    fn insert_html(&mut self, html: &str) {
        let wrapped = self.wrap(html);
        self.html.push_str(&wrapped);
    }

    fn apply_format(&mut self, format: Format) {
        if let Some(pos) = self.active.iter().position(|f| *f == format) {
            self.active.remove(pos);
        } else {
            self.active.push(format);
        }
    }

    fn clear(&mut self) {
        self.html.clear();
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_plain_text() {
        let mut surface = MemorySurface::new();
        surface.insert_text("a < b\nc");
        assert_eq!(surface.content(), "a &lt; b<br>c");
    }

    #[test]
    fn test_formats_wrap_in_toggle_order() {
        let mut surface = MemorySurface::new();
        surface.apply_format(Format::Bold);
        surface.apply_format(Format::Spoiler);
        surface.type_text("twist");
        assert_eq!(surface.content(), "<b>||twist||</b>");
    }

    #[test]
    fn test_toggle_off() {
        let mut surface = MemorySurface::new();
        surface.apply_format(Format::Italic);
        surface.apply_format(Format::Italic);
        assert!(surface.active_formats().is_empty());
        surface.type_text("plain");
        assert_eq!(surface.content(), "plain");
    }

    #[test]
    fn test_clear_resets_formats() {
        let mut surface = MemorySurface::with_content("x");
        surface.apply_format(Format::Underline);
        surface.clear();
        assert_eq!(surface.content(), "");
        assert!(surface.active_formats().is_empty());
    }
}
