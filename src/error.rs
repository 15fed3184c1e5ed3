//! Error types for panelmark operations.
//!
//! The markup pipeline itself never fails; these errors come from loading
//! configuration and from driving the editor state machine.

use thiserror::Error;

/// Errors that can occur while configuring or driving an editor.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Nothing to submit: the comment is empty")]
    EmptySubmission,

    #[error("A submission is already in flight")]
    SubmitInFlight,

    #[error("No submission is in flight")]
    NoSubmissionInFlight,

    #[error("Submission failed: {0}")]
    SubmitFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
