//! # panelmark
//!
//! Markup handling for comments on a manga reading and community platform:
//! title pages, the chapter reader, and the news section all accept the same
//! small rich-text dialect.
//!
//! ## Features
//!
//! - Allow-list sanitization of untrusted HTML, in a base and an extended
//!   (comment) vocabulary
//! - `||spoiler||` markers rendered as accessible inline spoilers
//! - Plain-text projection for character and line limits
//! - An editor state machine over a pluggable rich-text surface
//!
//! ## Quick Start
//!
//! ```
//! use panelmark::{convert_spoilers, sanitize_comment};
//!
//! let stored = sanitize_comment(r#"<p onclick="x()">the <strike>end</strike> ||is near||</p>"#);
//! assert_eq!(stored, "the <s>end</s> ||is near||<br>");
//!
//! let shown = convert_spoilers(&stored);
//! assert!(shown.contains(r#"<span class="spoiler" tabindex="0" role="button""#));
//! ```
//!
//! ## Driving an editor
//!
//! ```
//! use panelmark::{Editor, EditorConfig, Limits, MemorySurface, AllowList};
//!
//! let config = EditorConfig::new(AllowList::Extended, Limits::new(Some(12), Some(2)));
//! let mut editor = Editor::new(MemorySurface::new(), config);
//!
//! editor.surface_mut().type_text("far too long for this box");
//! assert!(editor.on_input());
//!
//! let submission = editor.submit().unwrap();
//! assert_eq!(submission.html, "far too long");
//! editor.complete_submit::<String>(Ok(())).unwrap();
//! ```

pub mod config;
pub mod dom;
pub mod editor;
pub mod error;
pub mod limits;
pub mod render;
pub mod sanitize;
pub mod spoiler;
pub mod text;
pub(crate) mod escape;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::EditorConfig;
pub use editor::{
    Clipboard, Editor, EditorState, Format, KeyOutcome, MemorySurface, RichTextSurface, Submission,
};
pub use error::{Error, Result};
pub use escape::{escape_attr, escape_text};
pub use limits::{Budget, Enforced, KeyPress, Limits, clip_paste, enforce, should_suppress_key};
pub use render::render_comment;
pub use sanitize::{AllowList, Policy, SpanStyle, sanitize, sanitize_basic, sanitize_comment};
pub use spoiler::{
    DEFAULT_SPOILER_LABEL, REVEALED_CLASS, SPOILER_CLASS, convert_spoilers,
    convert_spoilers_with_label,
};
pub use text::{TextStats, count_chars, count_lines, html_to_plain_text, plain_text_to_html};
pub use util::decode_text;
