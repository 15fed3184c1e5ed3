//! Editor configuration.
//!
//! Each comment surface picks an allow-list variant and its limits. The
//! configuration is plain data so it can live in JSON next to the rest of the
//! surface settings:
//!
//! ```json
//! { "allow_list": "extended", "limits": { "max_chars": 2000, "max_lines": 30 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::limits::Limits;
use crate::sanitize::{AllowList, Policy};
use crate::spoiler::DEFAULT_SPOILER_LABEL;

/// Settings for one editor instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub allow_list: AllowList,
    /// Fold block-level elements into `<br>`. Defaults to the variant's
    /// behavior when absent.
    pub fold_blocks: Option<bool>,
    pub limits: Limits,
    /// Accessible label announced for hidden spoiler content.
    pub spoiler_label: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            allow_list: AllowList::default(),
            fold_blocks: None,
            limits: Limits::default(),
            spoiler_label: DEFAULT_SPOILER_LABEL.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn new(allow_list: AllowList, limits: Limits) -> Self {
        Self {
            allow_list,
            limits,
            ..Self::default()
        }
    }

    /// The sanitizer policy this configuration implies.
    pub fn policy(&self) -> Policy {
        let mut policy = Policy::new(self.allow_list);
        if let Some(fold) = self.fold_blocks {
            policy.fold_blocks = fold;
        }
        policy
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
