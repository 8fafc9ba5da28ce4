//! Credential file parsing

use super::params::read_input;
use crate::auth::Credential;
use crate::error::{Error, Result};
use std::path::Path;

/// Load credentials from a newline-delimited file
pub fn load_credentials(path: impl AsRef<Path>) -> Result<Vec<Credential>> {
    let path = path.as_ref();
    let content = read_input(path, "credentials")?;
    let credentials = parse_credentials(&content);

    if credentials.is_empty() {
        return Err(Error::config(format!(
            "Credentials file '{}' contains no API keys",
            path.display()
        )));
    }
    Ok(credentials)
}

/// Parse credentials, one per line.
///
/// Surrounding whitespace is trimmed; blank lines and `#` comments are
/// skipped.
pub fn parse_credentials(content: &str) -> Vec<Credential> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Credential::new)
        .collect()
}
