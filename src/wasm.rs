//! WASM bindings for the browser comment editors.
//!
//! The contentEditable surfaces call into these on input, paste and submit,
//! and the comment lists call [`render_comment`] before injecting markup.

use wasm_bindgen::prelude::*;

use crate::config::EditorConfig;
use crate::limits::Limits;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Sanitize with the extended comment vocabulary.
#[wasm_bindgen]
pub fn sanitize_comment(html: &str) -> String {
    crate::sanitize::sanitize_comment(html)
}

/// Sanitize with the base vocabulary.
#[wasm_bindgen]
pub fn sanitize_basic(html: &str) -> String {
    crate::sanitize::sanitize_basic(html)
}

/// Sanitize stored markup and convert spoiler markers.
///
/// `config_json` is an optional JSON editor configuration.
#[wasm_bindgen]
pub fn render_comment(html: &str, config_json: Option<String>) -> Result<String, JsValue> {
    let config = match config_json {
        Some(json) => {
            EditorConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
        }
        None => EditorConfig::default(),
    };
    Ok(crate::render::render_comment(html, &config))
}

/// Plain-text projection used for counters.
#[wasm_bindgen]
pub fn plain_text(html: &str) -> String {
    crate::text::html_to_plain_text(html)
}

/// Clip plain text to the given limits. Zero means unbounded.
#[wasm_bindgen]
pub fn clip_plain_text(text: &str, max_chars: usize, max_lines: usize) -> String {
    let limits = Limits::new(
        (max_chars > 0).then_some(max_chars),
        (max_lines > 0).then_some(max_lines),
    );
    limits.clip(text).to_string()
}

/// Clip a paste to the room left in `current_html`. Returns `undefined` when
/// the editor is full.
#[wasm_bindgen]
pub fn clip_paste(
    current_html: &str,
    pasted: &str,
    max_chars: usize,
    max_lines: usize,
) -> Option<String> {
    let limits = Limits::new(
        (max_chars > 0).then_some(max_chars),
        (max_lines > 0).then_some(max_lines),
    );
    crate::limits::clip_paste(current_html, pasted, &limits)
}
