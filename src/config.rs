//! Runtime configuration for mcmanager.
//!
//! All settings are resolved once at startup by [`Config::from_env`] and then
//! passed by reference to whatever needs them. The only environment input is
//! `NETRC`, which overrides where stored credentials are read from.

use std::{env, path::PathBuf};

/// Versioned base URL of the MangaCat API.
pub const API_URL: &str = "https://api.manga.cat/v1";

/// Machine name looked up in the netrc file.
pub const NETRC_HOST: &str = "manga.cat";

/// Environment variable overriding the default netrc location.
pub const NETRC_ENV: &str = "NETRC";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every API path is joined to.
    pub api_url: String,
    /// Netrc file used when `login --netrc` is given without a path.
    pub netrc_path: PathBuf,
    /// Value of the `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Netrc Location
    ///
    /// The default netrc file is resolved in this order:
    /// 1. The `NETRC` environment variable
    /// 2. `.netrc` in the user's home directory
    /// 3. `.netrc` in the current directory if no home directory is known
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::from_env();
    /// println!("Using API at {}", config.api_url);
    /// ```
    pub fn from_env() -> Self {
        Self {
            api_url: API_URL.to_string(),
            netrc_path: default_netrc_path(),
            user_agent: user_agent(),
        }
    }

    /// Joins `path` to the API base URL. Absolute URLs are returned as-is.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{base}/{path}",
            base = self.api_url.trim_end_matches('/'),
            path = path.trim_start_matches('/')
        )
    }
}

pub fn default_netrc_path() -> PathBuf {
    match env::var_os(NETRC_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => {
            let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push(".netrc");
            path
        }
    }
}

pub fn user_agent() -> String {
    format!(
        "{name}/{version}",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION")
    )
}
