//! # CLI Module
//!
//! Command handlers of mcmanager and the dispatcher mapping a parsed
//! [`Command`] to one of them.
//!
//! ## Command Lifecycle
//!
//! ```text
//! Parse → Validate → (Resolve Credentials | Build Request) → Submit → Report
//! ```
//!
//! Parsing and validation happen in clap (see [`crate::args`]). Every handler
//! then finishes its own checks before sending anything, so an `Err` returned
//! by [`dispatch`] always means that no request was made. Failed requests are
//! reported through [`Outcome::code`] instead.
//!
//! ## Commands
//!
//! - `login` - [`login`]: resolves credentials and prints a token
//! - `chapters add` - [`add_chapter`]: creates a chapter and uploads its pages
//! - `series add` - validated, then rejected as not implemented
//!
//! Every other declared subcommand routes to [`Route::NotImplemented`] and
//! fails with [`Error::NotImplemented`].
//!
//! ## Exit Codes
//!
//! - `0` - success
//! - `1` - a request failed or its response was unusable
//! - `2` - invalid arguments or credentials, nothing was sent
//! - `3` - the command is not implemented

mod chapters;
mod login;
mod series;

pub use chapters::add_chapter;
pub use chapters::chapter_request;
pub use login::login;
pub use series::add_series;

use crate::{
    Res,
    args::{
        ChaptersAddOpts, ChaptersSubcommand, Command, EntitySubcommand, LoginOptions,
        SeriesAddOpts, SeriesSubcommand,
    },
    config::Config,
    credentials::Prompter,
    error::Error,
    mangacat::ApiClient,
};

/// Result of a handler that got as far as sending requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub code: i32,
    /// Printed once on success.
    pub message: Option<String>,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            code: 0,
            message: Some(message.into()),
        }
    }

    pub fn failure() -> Self {
        Self {
            code: 1,
            message: None,
        }
    }
}

/// Handler selected for a parsed command.
#[derive(Debug, Clone, Copy)]
pub enum Route<'a> {
    Login(&'a LoginOptions),
    SeriesAdd(&'a SeriesAddOpts),
    ChaptersAdd(&'a ChaptersAddOpts),
    /// Declared on the command line but without a handler.
    NotImplemented(&'static str),
}

impl Command {
    pub fn route(&self) -> Route<'_> {
        match self {
            Command::Login(opts) => Route::Login(opts),
            Command::Series(opt) => match &opt.command {
                SeriesSubcommand::Add(opts) => Route::SeriesAdd(opts),
                SeriesSubcommand::Edit => Route::NotImplemented("series edit"),
                SeriesSubcommand::Delete => Route::NotImplemented("series delete"),
            },
            Command::Chapters(opt) => match &opt.command {
                ChaptersSubcommand::Add(opts) => Route::ChaptersAdd(opts),
                ChaptersSubcommand::Edit => Route::NotImplemented("chapters edit"),
                ChaptersSubcommand::Delete => Route::NotImplemented("chapters delete"),
            },
            Command::People(opt) => match opt.command {
                EntitySubcommand::Add => Route::NotImplemented("people add"),
                EntitySubcommand::Edit => Route::NotImplemented("people edit"),
                EntitySubcommand::Delete => Route::NotImplemented("people delete"),
            },
            Command::Groups(opt) => match opt.command {
                EntitySubcommand::Add => Route::NotImplemented("groups add"),
                EntitySubcommand::Edit => Route::NotImplemented("groups edit"),
                EntitySubcommand::Delete => Route::NotImplemented("groups delete"),
            },
        }
    }
}

/// Runs the handler for `command`.
///
/// `prompter` is only used by `login` with interactive credentials.
pub async fn dispatch(
    command: &Command,
    config: &Config,
    client: &ApiClient,
    prompter: &mut dyn Prompter,
) -> Res<Outcome> {
    match command.route() {
        Route::Login(opts) => login(opts, config, client, prompter).await,
        Route::SeriesAdd(opts) => add_series(opts),
        Route::ChaptersAdd(opts) => add_chapter(opts, client).await,
        Route::NotImplemented(name) => Err(Error::NotImplemented(name)),
    }
}
