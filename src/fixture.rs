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

//! Fixture payload generation.
//!
//! Uniqueness comes from a random v4 UUID per fixture, so no counter or other
//! shared state is involved.

use uuid::Uuid;

use crate::types::{DEFAULT_GENDER, DEFAULT_STATUS, NewUser, User};

const TOKEN_LEN: usize = 8;

/// A fresh random token: the first 8 hex characters of a v4 UUID
pub fn unique_token() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(TOKEN_LEN);
    token
}

impl NewUser {
    /// Build a payload around the given token
    pub fn with_token(token: &str) -> Self {
        Self {
            name: format!("TestUser_{token}"),
            email: format!("test_{token}@test.com"),
            gender: DEFAULT_GENDER.to_string(),
            status: DEFAULT_STATUS.to_string(),
        }
    }

    /// Build a payload with a freshly generated unique name and email
    pub fn generate() -> Self {
        Self::with_token(&unique_token())
    }

    /// Fresh name and email, gender and status carried over from `existing`
    pub fn regenerated_from(existing: &User) -> Self {
        Self::generate()
            .gender(&existing.gender)
            .status(&existing.status)
    }

    pub fn gender(mut self, gender: &str) -> Self {
        self.gender = gender.to_string();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }
}
