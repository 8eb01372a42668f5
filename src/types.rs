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

use serde::{Deserialize, Serialize};

/// Gender value used when a fixture does not override it
pub const DEFAULT_GENDER: &str = "male";
/// Status value used when a fixture does not override it
pub const DEFAULT_STATUS: &str = "active";

/// A user as returned by the remote API; `id` is assigned server-side
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub status: String,
}

/// Payload for creating or replacing a user. Carries no id: the remote system
/// owns identifiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub gender: String,
    pub status: String,
}
