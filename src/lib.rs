//! MangaCat Manager Library
//!
//! This library provides the pieces behind the `mcmanager` command-line
//! client: argument validation, credential resolution, image signature
//! detection and the HTTP client submitting series and chapters to the
//! MangaCat API.
//!
//! # Modules
//!
//! - `args` - Command-line schema parsed by clap
//! - `cli` - Command handlers and the dispatcher
//! - `config` - Runtime configuration resolved at startup
//! - `credentials` - Interactive and netrc credential resolution
//! - `error` - Error type and exit code mapping
//! - `mangacat` - MangaCat API client implementation
//! - `sniff` - Image format detection from file signatures
//! - `types` - Request payloads and credential types
//! - `validate` - Value validators used by the argument parser
//! - `vocab` - Fixed value lists accepted by the API
//!
//! # Example
//!
//! ```
//! use mcmanager::{args::Cli, cli, config::Config, credentials::TerminalPrompter, mangacat::ApiClient};
//!
//! #[tokio::main]
//! async fn main() -> mcmanager::Res<()> {
//!     let cli = <Cli as clap::Parser>::parse();
//!     let config = Config::from_env();
//!     let client = ApiClient::new(&config)?;
//!     let outcome = cli::dispatch(&cli.command, &config, &client, &mut TerminalPrompter).await?;
//!     std::process::exit(outcome.code);
//! }
//! ```

pub mod args;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod mangacat;
pub mod sniff;
pub mod types;
pub mod validate;
pub mod vocab;

/// Result type used throughout the crate.
///
/// Errors are [`error::Error`] values, which know their process exit code.
pub type Res<T> = std::result::Result<T, error::Error>;

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
///
/// # Example
///
/// ```
/// success!("Added chapter with ID: {}", id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues that users should notice, such as files
/// left out of an upload.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// The first argument is the exit code; the rest is formatted like
/// `println!`. Printing goes to stderr.
///
/// # Example
///
/// ```
/// fatal!(2, "no \"manga.cat\" machine found in netrc file");
/// // Program exits here with code 2
/// ```
#[macro_export]
macro_rules! fatal {
  ($code:expr, $($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit($code);
  })
}
