//! Error types shared by the validators, the credential resolver and the
//! command handlers.
//!
//! Only failures that happen *before* a request is sent (bad arguments,
//! missing credentials, unreadable files) and unimplemented commands are
//! modelled here. Failed submissions are logged and reported through the
//! handler's exit code instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A flag value or credential source that cannot be used.
    #[error("{0}")]
    Config(String),

    /// A raw argument rejected by one of the value validators.
    #[error("{0}")]
    Validation(String),

    #[error("{0} is not implemented yet")]
    NotImplemented(&'static str),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read from terminal: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Cannot set up HTTP session: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Process exit code for an error that escaped a command handler.
    ///
    /// `1` is reserved for failed requests. Every error here is raised
    /// before the first request, so none of them maps to it.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_)
            | Error::Validation(_)
            | Error::Io(_)
            | Error::Prompt(_)
            | Error::Http(_) => 2,
            Error::NotImplemented(_) => 3,
        }
    }
}
