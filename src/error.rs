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

use reqwest::StatusCode;
use thiserror::Error;

/// The harness could not be configured; the run is inconclusive rather than failed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration missing: environment variable {0} is not set")]
    MissingToken(&'static str),
    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("bearer token cannot be used as an HTTP header value")]
    InvalidToken,
}

/// Error type for scenario execution
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{context}: could not decode response body: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{context}: expected status {expected}, got {actual} (body: {body})")]
    UnexpectedStatus {
        context: String,
        expected: StatusCode,
        actual: StatusCode,
        body: String,
    },
    #[error("{context}: {detail}")]
    Assertion { context: String, detail: String },
}

impl HarnessError {
    pub fn assertion(context: impl Into<String>, detail: impl Into<String>) -> Self {
        HarnessError::Assertion {
            context: context.into(),
            detail: detail.into(),
        }
    }

    /// Whether this error means the environment is not set up, as opposed to a
    /// behavioral regression in the API under test
    pub fn is_configuration(&self) -> bool {
        matches!(self, HarnessError::Config(_))
    }
}

/// Alias for Result using HarnessError
pub type HarnessResult<T> = Result<T, HarnessError>;
