//! Comment editor state machine.
//!
//! An [`Editor`] owns one [`RichTextSurface`] and runs the sanitize, project
//! and enforce steps on every input event. It never talks to the network:
//! [`Editor::submit`] hands out the final payload and the caller reports the
//! outcome through [`Editor::complete_submit`].
//!
//! ```text
//! Empty ──input──▶ Editing ──submit──▶ Submitting ──ok──▶ Empty
//!                    ▲                     │
//!                    └────────error────────┘
//! ```

mod surface;

pub use surface::{Format, MemorySurface, RichTextSurface};

use std::fmt::Display;

use crate::config::EditorConfig;
use crate::error::{Error, Result};
use crate::limits::{KeyPress, clip_paste, enforce, should_suppress_key};
use crate::sanitize::{Policy, sanitize};
use crate::text::{TextStats, html_to_plain_text};

/// Lifecycle of one editor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Empty,
    Editing,
    Submitting,
}

/// Clipboard contents offered to a paste.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    pub html: Option<String>,
    pub text: String,
}

impl Clipboard {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            html: None,
            text: text.into(),
        }
    }

    pub fn with_html(html: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            text: text.into(),
        }
    }
}

/// What the surface should do with a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Allow,
    Suppress,
    /// The submit shortcut was pressed.
    Submit,
}

/// Payload ready to be sent to the comments API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub html: String,
    pub stats: TextStats,
    /// The final limit check clipped the content.
    pub truncated: bool,
}

/// A comment editor bound to a surface.
pub struct Editor<S> {
    surface: S,
    config: EditorConfig,
    policy: Policy,
    state: EditorState,
}

impl<S: RichTextSurface> Editor<S> {
    pub fn new(surface: S, config: EditorConfig) -> Self {
        let policy = config.policy();
        let mut editor = Self {
            surface,
            config,
            policy,
            state: EditorState::Empty,
        };
        editor.refresh_state();
        editor
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Current content, sanitized.
    pub fn sanitized(&self) -> String {
        sanitize(&self.surface.content(), &self.policy)
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of_html(&self.sanitized())
    }

    /// Handle an input event. Returns whether the content had to be clipped.
    pub fn on_input(&mut self) -> bool {
        let enforced = enforce(&self.sanitized(), &self.config.limits);
        if enforced.truncated {
            self.surface.set_content(&enforced.html);
        }
        self.refresh_state();
        enforced.truncated
    }

    /// Handle a paste. Returns whether anything was inserted.
    ///
    /// Rich clipboard content is sanitized and inserted whole when it fits the
    /// remaining budget; otherwise the plain-text flavor is clipped to fit.
    pub fn on_paste(&mut self, clipboard: &Clipboard) -> bool {
        let current = self.sanitized();
        let limits = &self.config.limits;

        if let Some(html) = &clipboard.html {
            let pasted = sanitize(html, &self.policy);
            let budget = limits.budget(&TextStats::of_html(&current));
            if !pasted.is_empty() && budget.fits(&TextStats::of_html(&pasted)) {
                self.surface.insert_html(&pasted);
                self.refresh_state();
                return true;
            }
        }

        let inserted = match clip_paste(&current, &clipboard.text, limits) {
            Some(text) => {
                self.surface.insert_text(&text);
                true
            }
            None => false,
        };
        self.refresh_state();
        inserted
    }

    /// Decide what to do with a keystroke before it reaches the surface.
    pub fn on_keydown(&self, key: KeyPress) -> KeyOutcome {
        if key == (KeyPress::Enter {
            submit_shortcut: true,
        }) {
            return KeyOutcome::Submit;
        }
        if should_suppress_key(&self.sanitized(), key, &self.config.limits) {
            KeyOutcome::Suppress
        } else {
            KeyOutcome::Allow
        }
    }

    pub fn toggle_format(&mut self, format: Format) {
        self.surface.apply_format(format);
    }

    /// Run the final sanitize and limit pass and enter `Submitting`.
    pub fn submit(&mut self) -> Result<Submission> {
        if self.state == EditorState::Submitting {
            return Err(Error::SubmitInFlight);
        }

        let enforced = enforce(&self.sanitized(), &self.config.limits);
        if html_to_plain_text(&enforced.html).trim().is_empty() {
            return Err(Error::EmptySubmission);
        }
        if enforced.truncated {
            self.surface.set_content(&enforced.html);
        }

        self.state = EditorState::Submitting;
        tracing::debug!(
            chars = enforced.stats.chars,
            lines = enforced.stats.lines,
            truncated = enforced.truncated,
            "submitting comment"
        );
        Ok(Submission {
            html: enforced.html,
            stats: enforced.stats,
            truncated: enforced.truncated,
        })
    }

    /// Report how the submission went.
    ///
    /// On success the surface is cleared. On failure the content is kept so
    /// the author can retry, and the failure is returned as
    /// [`Error::SubmitFailed`].
    pub fn complete_submit<E: Display>(&mut self, outcome: std::result::Result<(), E>) -> Result<()> {
        if self.state != EditorState::Submitting {
            return Err(Error::NoSubmissionInFlight);
        }

        match outcome {
            Ok(()) => {
                self.surface.clear();
                self.state = EditorState::Empty;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "submission failed; keeping content");
                self.state = EditorState::Editing;
                self.refresh_state();
                Err(Error::SubmitFailed(e.to_string()))
            }
        }
    }

    /// Discard the content. Any in-flight submission's outcome is ignored.
    pub fn cancel(&mut self) {
        self.surface.clear();
        self.state = EditorState::Empty;
    }

    fn refresh_state(&mut self) {
        if self.state == EditorState::Submitting {
            return;
        }
        // Markup with nothing visible, such as `<p></p>`, still counts as empty.
        self.state = if html_to_plain_text(&self.sanitized()).trim().is_empty() {
            EditorState::Empty
        } else {
            EditorState::Editing
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::Limits;
    use crate::sanitize::AllowList;

    fn editor(limits: Limits) -> Editor<MemorySurface> {
        Editor::new(
            MemorySurface::new(),
            EditorConfig::new(AllowList::Extended, limits),
        )
    }

    #[test]
    fn test_starts_empty() {
        let editor = editor(Limits::unlimited());
        assert_eq!(editor.state(), EditorState::Empty);
        assert_eq!(editor.stats(), TextStats::default());
    }

    #[test]
    fn test_input_moves_to_editing() {
        let mut editor = editor(Limits::unlimited());
        editor.surface_mut().type_text("hello");
        assert!(!editor.on_input());
        assert_eq!(editor.state(), EditorState::Editing);
    }

    #[test]
    fn test_input_over_limit_is_clipped() {
        let mut editor = editor(Limits::new(Some(5), None));
        editor.surface_mut().type_text("hello world");
        assert!(editor.on_input());
        assert_eq!(editor.surface().content(), "hello");
    }

    #[test]
    fn test_browser_line_divs_count_as_lines() {
        let mut editor = editor(Limits::new(None, Some(2)));
        editor
            .surface_mut()
            .set_content("<div>one</div><div>two</div><div>three</div>");
        assert!(editor.on_input());
        assert_eq!(editor.surface().content(), "one<br>two");
    }

    #[test]
    fn test_submit_then_success_clears() {
        let mut editor = editor(Limits::unlimited());
        editor.surface_mut().type_text("nice chapter");
        editor.on_input();

        let submission = editor.submit().unwrap();
        assert_eq!(submission.html, "nice chapter");
        assert_eq!(editor.state(), EditorState::Submitting);

        editor.complete_submit::<String>(Ok(())).unwrap();
        assert_eq!(editor.state(), EditorState::Empty);
        assert_eq!(editor.surface().content(), "");
    }

    #[test]
    fn test_submit_failure_keeps_content() {
        let mut editor = editor(Limits::unlimited());
        editor.surface_mut().type_text("retry me");
        editor.submit().unwrap();

        let err = editor.complete_submit(Err("503")).unwrap_err();
        assert!(matches!(err, Error::SubmitFailed(ref msg) if msg == "503"));
        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(editor.surface().content(), "retry me");
    }

    #[test]
    fn test_double_submit_rejected() {
        let mut editor = editor(Limits::unlimited());
        editor.surface_mut().type_text("once");
        editor.submit().unwrap();
        assert!(matches!(editor.submit(), Err(Error::SubmitInFlight)));
    }

    #[test]
    fn test_empty_submit_rejected() {
        let mut editor = editor(Limits::unlimited());
        editor.surface_mut().set_content("<p> </p><script>x</script>");
        assert!(matches!(editor.submit(), Err(Error::EmptySubmission)));
        assert_ne!(editor.state(), EditorState::Submitting);
    }

    #[test]
    fn test_invisible_markup_stays_empty() {
        let mut editor = editor(Limits::unlimited());
        editor.surface_mut().set_content("<img src=x><p></p>");
        editor.on_input();
        assert_eq!(editor.state(), EditorState::Empty);

        editor.surface_mut().insert_html("<b>x</b>");
        editor.on_input();
        assert_eq!(editor.state(), EditorState::Editing);
    }

    #[test]
    fn test_complete_without_submit() {
        let mut editor = editor(Limits::unlimited());
        assert!(matches!(
            editor.complete_submit::<String>(Ok(())),
            Err(Error::NoSubmissionInFlight)
        ));
    }

    #[test]
    fn test_keydown_outcomes() {
        let mut editor = editor(Limits::new(Some(3), Some(1)));
        editor.surface_mut().type_text("abc");
        assert_eq!(editor.on_keydown(KeyPress::Char('d')), KeyOutcome::Suppress);
        assert_eq!(editor.on_keydown(KeyPress::Other), KeyOutcome::Allow);
        assert_eq!(
            editor.on_keydown(KeyPress::Enter {
                submit_shortcut: true
            }),
            KeyOutcome::Submit
        );
    }
}
