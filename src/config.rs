// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use std::env;

use reqwest::Url;

use crate::error::ConfigError;

/// Environment variable holding the bearer token for the API under test
pub const TOKEN_ENV_VAR: &str = "USERS_API_TOKEN";

/// Base URL of the API under test
pub const DEFAULT_BASE_URL: &str = "https://gorest.co.in/public/v2";

/// Configuration for a contract run, read-only once built
#[derive(Clone)]
pub struct Config {
    /// Base URL the `users` collection hangs off
    pub base_url: Url,
    users_url: Url,
    /// Bearer token sent on every request
    token: String,
}

impl Config {
    /// Create a config with an explicit base URL and token (useful for testing)
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = Self::parse_base_url(base_url)?;
        // base_url always ends with '/', so joining appends instead of replacing
        let users_url = base_url
            .join("users")
            .map_err(|e| ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::MissingToken(TOKEN_ENV_VAR));
        }
        Ok(Self {
            base_url,
            users_url,
            token,
        })
    }

    /// Load the config from the environment against the default base URL
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_base_url(DEFAULT_BASE_URL)
    }

    /// Load the token from the environment, pointing at the given base URL
    pub fn from_env_with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let token = Self::get_token().ok_or(ConfigError::MissingToken(TOKEN_ENV_VAR))?;
        let config = Self::new(base_url, token)?;
        tracing::info!("Users API base URL: {}", config.base_url);
        tracing::info!("Bearer token configured from {}", TOKEN_ENV_VAR);
        Ok(config)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// URL of the users collection
    pub fn users_url(&self) -> Url {
        self.users_url.clone()
    }

    /// URL of a single user, one path segment below the collection
    pub fn user_url(&self, id: i64) -> Url {
        let mut url = self.users_url.clone();
        let path = format!("{}/{id}", url.path());
        url.set_path(&path);
        url
    }

    fn get_token() -> Option<String> {
        env::var(TOKEN_ENV_VAR)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    fn parse_base_url(base_url: &str) -> Result<Url, ConfigError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let url = Url::parse(&normalized).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }
        Ok(url)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}
