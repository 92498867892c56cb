use crate::settings::Settings;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn expiry_buffer() -> Duration {
    Duration::minutes(5)
}

/// Bearer token with optional expiration, cached on disk between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredToken {
    pub fn is_usable(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at > Utc::now() + expiry_buffer(),
            None => true,
        }
    }
}

pub struct TokenStore {
    token_path: PathBuf,
}

impl TokenStore {
    pub fn new() -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .ok_or(anyhow!("Could not find cache directory"))?
            .join("tripflow");

        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;
        }

        Ok(Self {
            token_path: cache_dir.join("token.json"),
        })
    }

    pub fn save_token(&self, token: &StoredToken) -> Result<()> {
        let json = serde_json::to_string_pretty(token)?;
        fs::write(&self.token_path, json).context("Failed to save token")?;

        // Token file is readable by the owner only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.token_path)
                .context("Failed to get token file permissions")?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.token_path, perms)
                .context("Failed to set token file permissions")?;
        }

        Ok(())
    }

    pub fn load_token(&self) -> Result<Option<StoredToken>> {
        if !self.token_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.token_path).context("Failed to read token")?;
        let token: StoredToken = serde_json::from_str(&json)?;
        Ok(Some(token))
    }
}

/// Resolve the bearer token: a still-valid cached token wins, otherwise the
/// configured token is taken and cached for the next run.
pub fn authenticate(settings: &Settings) -> Result<StoredToken> {
    let store = TokenStore::new()?;

    if let Some(cached) = store.load_token()? {
        if cached.is_usable() {
            tracing::debug!("Using cached access token");
            return Ok(cached);
        }
        tracing::info!("Cached access token expired");
    }

    let access_token = settings
        .access_token
        .clone()
        .ok_or(anyhow!("No access token configured; set TRIPFLOW_ACCESS_TOKEN"))?;

    let token = StoredToken {
        access_token,
        expires_at: None,
    };
    store.save_token(&token)?;
    Ok(token)
}
