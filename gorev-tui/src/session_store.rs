//! Durable home of the bearer token. The token is the only local state
//! that survives a restart.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("gorev-tui"))
}

pub fn token_path() -> Result<PathBuf> {
    Ok(root_path()?.join("session"))
}

// Pre-0.1 builds stored the token under this name.
fn legacy_token_path() -> Result<PathBuf> {
    Ok(root_path()?.join("token"))
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

fn read_token_file(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let token = std::fs::read_to_string(path).context("Failed to read session file")?;
    let token = token.trim().to_string();
    if token.is_empty() {
        return Ok(None);
    }
    Ok(Some(token))
}

/// Load the saved token, honoring the legacy file name and migrating
/// it to the current path on sight.
pub fn load_token() -> Result<Option<String>> {
    if let Some(token) = read_token_file(&token_path()?)? {
        return Ok(Some(token));
    }

    let legacy = legacy_token_path()?;
    if let Some(token) = read_token_file(&legacy)? {
        save_token(&token)?;
        let _ = std::fs::remove_file(&legacy);
        return Ok(Some(token));
    }

    Ok(None)
}

pub fn save_token(token: &str) -> Result<()> {
    secure_write(token_path()?.as_path(), token)
}

/// Remove the stored token, both current and legacy locations.
pub fn clear_token() -> Result<()> {
    for path in [token_path()?, legacy_token_path()?] {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
    }
    Ok(())
}
