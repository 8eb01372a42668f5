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

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{ConfigError, HarnessError, HarnessResult};
use crate::types::NewUser;

/// Status and raw body of one API call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Parse the body as JSON
    pub fn json<T: DeserializeOwned>(&self, context: &str) -> HarnessResult<T> {
        serde_json::from_str(&self.body).map_err(|source| HarnessError::Decode {
            context: context.to_string(),
            source,
        })
    }
}

/// HTTP transport for one scenario.
///
/// Each scenario builds its own client and drops it when done, so default
/// headers and connection state never leak between scenarios.
pub struct UsersClient {
    http: reqwest::Client,
    config: Config,
}

impl UsersClient {
    pub fn new(config: &Config) -> HarnessResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token()))
            .map_err(|_| ConfigError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// GET /users
    pub async fn list(&self) -> HarnessResult<ApiResponse> {
        self.send(self.http.get(self.config.users_url()), "list users")
            .await
    }

    /// GET /users?email=...
    pub async fn list_by_email(&self, email: &str) -> HarnessResult<ApiResponse> {
        let request = self
            .http
            .get(self.config.users_url())
            .query(&[("email", email)]);
        self.send(request, "find user by email").await
    }

    /// GET /users/{id}
    pub async fn get(&self, id: i64) -> HarnessResult<ApiResponse> {
        self.send(self.http.get(self.config.user_url(id)), "get user")
            .await
    }

    /// POST /users
    pub async fn create(&self, payload: &NewUser) -> HarnessResult<ApiResponse> {
        let request = self.http.post(self.config.users_url()).json(payload);
        self.send(request, "create user").await
    }

    /// PUT /users/{id}
    pub async fn update(&self, id: i64, payload: &NewUser) -> HarnessResult<ApiResponse> {
        let request = self.http.put(self.config.user_url(id)).json(payload);
        self.send(request, "update user").await
    }

    /// DELETE /users/{id}
    pub async fn delete(&self, id: i64) -> HarnessResult<ApiResponse> {
        self.send(self.http.delete(self.config.user_url(id)), "delete user")
            .await
    }

    async fn send(&self, request: RequestBuilder, operation: &str) -> HarnessResult<ApiResponse> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{} -> {}", operation, status);
        Ok(ApiResponse { status, body })
    }
}
