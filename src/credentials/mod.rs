//! # Credentials Module
//!
//! Resolves the e-mail, username and password used by `login`. Exactly one of
//! two strategies is selected per invocation:
//!
//! - **Interactive**: up to three values are given on the command line, in the
//!   order e-mail, username, password. Every missing value is prompted for.
//!   E-mail and password prompts repeat until the answer is non-empty; the
//!   username prompt accepts an empty answer. The password is read without
//!   echo.
//! - **Netrc**: the `manga.cat` machine of a netrc file provides all three
//!   values (`login` → e-mail, `account` → username, `password` → password).
//!
//! Both strategies fail with [`Error::Config`] before any request is made.

mod netrc;
mod prompt;

use std::path::PathBuf;

pub use netrc::{Machine, Netrc};
pub use prompt::{Prompter, TerminalPrompter};

use crate::{
    Res,
    config::{Config, NETRC_HOST},
    error::Error,
    types::Credentials,
};

/// Most values accepted by the interactive strategy.
pub const MAX_VALUES: usize = 3;

/// Where the credentials of a `login` come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSource {
    /// Values given up front; missing ones are prompted for.
    Interactive(Vec<String>),
    /// A netrc file; `None` selects the configured default path.
    Netrc(Option<PathBuf>),
}

/// Turns an [`AuthSource`] into a complete set of [`Credentials`].
///
/// # Arguments
///
/// * `source` - The strategy selected on the command line
/// * `config` - Supplies the default netrc path
/// * `prompter` - Asked for every value the interactive strategy is missing
///
/// # Errors
///
/// - More than [`MAX_VALUES`] interactive values (nothing is prompted)
/// - An unreadable netrc file or one without a `manga.cat` machine
/// - A terminal that cannot be read from
///
/// # Example
///
/// ```
/// let source = AuthSource::Interactive(vec!["me@example.com".into()]);
/// let creds = resolve(&source, &config, &mut TerminalPrompter)?;
/// // only username and password were asked for
/// ```
pub fn resolve(source: &AuthSource, config: &Config, prompter: &mut dyn Prompter) -> Res<Credentials> {
    match source {
        AuthSource::Interactive(values) => from_values(values, prompter),
        AuthSource::Netrc(path) => {
            let path = path.as_ref().unwrap_or(&config.netrc_path);
            log::info!("Using netrc file \"{}\".", path.display());
            from_netrc(&Netrc::load(path)?)
        }
    }
}

fn from_values(values: &[String], prompter: &mut dyn Prompter) -> Res<Credentials> {
    if values.len() > MAX_VALUES {
        return Err(Error::Config(format!(
            "cannot have more than {MAX_VALUES} values: \"{}\"",
            values.join(" ")
        )));
    }

    let email = match values.first() {
        Some(v) => v.clone(),
        None => ask_until_answered(prompter, "E-mail", false)?,
    };
    let username = match values.get(1) {
        Some(v) => v.clone(),
        None => prompter.input("Username")?,
    };
    let password = match values.get(2) {
        Some(v) => v.clone(),
        None => ask_until_answered(prompter, "Password", true)?,
    };

    Ok(Credentials {
        email,
        username,
        password,
    })
}

fn ask_until_answered(prompter: &mut dyn Prompter, prompt: &str, hidden: bool) -> Res<String> {
    loop {
        let answer = if hidden {
            prompter.password(prompt)?
        } else {
            prompter.input(prompt)?
        };
        if !answer.is_empty() {
            return Ok(answer);
        }
        prompter.complain(&format!("{prompt} cannot be empty!"));
    }
}

/// Reads the `manga.cat` machine of a parsed netrc file.
pub fn from_netrc(netrc: &Netrc) -> Res<Credentials> {
    let machine = netrc.machine(NETRC_HOST).ok_or_else(|| {
        Error::Config(format!("no \"{NETRC_HOST}\" machine found in netrc file"))
    })?;

    let required = |value: &Option<String>, field: &str| {
        value.clone().filter(|v| !v.is_empty()).ok_or_else(|| {
            Error::Config(format!(
                "no {field} for \"{NETRC_HOST}\" machine in netrc file"
            ))
        })
    };

    Ok(Credentials {
        email: required(&machine.login, "login")?,
        username: machine.account.clone().unwrap_or_default(),
        password: required(&machine.password, "password")?,
    })
}
