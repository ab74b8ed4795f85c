//! Service locations and the cookie file.
//!
//! Both services have a fixed public default that can be overridden through
//! the environment.

use std::path::PathBuf;

/// Default terms service location.
pub const DEFAULT_TERMS_URL: &str = "https://api.jujucharms.com/terms";

/// Default identity manager location.
pub const DEFAULT_IDENTITY_URL: &str = "https://api.jujucharms.com/identity/v1";

/// Environment variable overriding [`DEFAULT_TERMS_URL`].
pub const TERMS_URL_ENV: &str = "JUJU_TERMS";

/// Environment variable overriding [`DEFAULT_IDENTITY_URL`].
pub const IDENTITY_URL_ENV: &str = "JUJU_IDENTITY";

/// Environment variable naming the cookie file.
pub const COOKIE_FILE_ENV: &str = "JUJU_COOKIEFILE";

/// Cookie file name in the home directory.
pub const DEFAULT_COOKIE_FILE: &str = ".go-cookies";

/// Returns the terms service URL from the process environment.
pub fn terms_url() -> String {
    terms_url_from(|key| std::env::var(key).ok())
}

/// Returns the identity manager URL from the process environment.
pub fn identity_url() -> String {
    identity_url_from(|key| std::env::var(key).ok())
}

/// Like [`terms_url`], reading variables through `lookup`.
pub fn terms_url_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup(TERMS_URL_ENV)).unwrap_or_else(|| DEFAULT_TERMS_URL.to_string())
}

/// Like [`identity_url`], reading variables through `lookup`.
pub fn identity_url_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup(IDENTITY_URL_ENV)).unwrap_or_else(|| DEFAULT_IDENTITY_URL.to_string())
}

/// Returns the file holding saved cookies, or `None` when neither
/// [`COOKIE_FILE_ENV`] nor a home directory is available.
pub fn cookie_file() -> Option<PathBuf> {
    cookie_file_from(|key| std::env::var(key).ok(), dirs::home_dir())
}

/// Like [`cookie_file`], reading variables through `lookup` and falling back
/// to `home`.
pub fn cookie_file_from<F>(lookup: F, home: Option<PathBuf>) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup(COOKIE_FILE_ENV))
        .map(PathBuf::from)
        .or_else(|| home.map(|home| home.join(DEFAULT_COOKIE_FILE)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
