use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;

pub const TOKEN_ENV: &str = "NOTION_TOKEN";
const TOKEN_FILE: &str = "notion-token";

/// Resolve the Notion integration token once at startup.
///
/// Order: `NOTION_TOKEN` environment variable, then a `notion-token` file
/// in the user config directory. Both are trimmed; an empty value counts
/// as missing.
pub fn resolve_token() -> Result<String> {
    if let Ok(raw) = env::var(TOKEN_ENV) {
        let token = raw.trim().to_string();
        if !token.is_empty() {
            return Ok(token);
        }
    }

    let dirs = ProjectDirs::from("", "", "placesync")
        .context("Could not determine the user config directory")?;
    let path = dirs.config_dir().join(TOKEN_FILE);
    let raw = fs::read_to_string(&path).with_context(|| {
        format!(
            "No {} set and no token file at {}",
            TOKEN_ENV,
            path.display()
        )
    })?;

    let token = raw.trim().to_string();
    if token.is_empty() {
        bail!("Token file {} is empty", path.display());
    }
    Ok(token)
}
