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

// Public modules for integration tests and library usage
pub mod assertions;
pub mod client;
pub mod config;
pub mod error;
pub mod fixture;
pub mod lifecycle;
pub mod runner;
pub mod scenarios;
pub mod types;

// Re-export commonly used types for convenience
pub use client::{ApiResponse, UsersClient};
pub use config::Config;
pub use error::{ConfigError, HarnessError, HarnessResult};
pub use runner::{RunReport, RunStatus, ScenarioOutcome, run_scenarios};
pub use scenarios::Scenario;
pub use types::{NewUser, User};
