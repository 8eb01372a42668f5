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

//! The five CRUD scenarios run against the `users` collection.
//!
//! Every scenario follows Arrange -> Act/Assert -> Cleanup. Scenarios that
//! create a fixture release it through [`with_fixture`] or [`guarded`], so
//! cleanup happens whether or not the assertions pass.

use std::fmt;
use std::str::FromStr;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::info;

use crate::assertions::{ensure, expect_field, expect_status};
use crate::client::UsersClient;
use crate::config::Config;
use crate::error::HarnessResult;
use crate::lifecycle::{create_fixture, delete_by_email_quietly, guarded, with_fixture};
use crate::types::{NewUser, User};

/// One CRUD behavior under verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    List,
    Get,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Error)]
#[error("unknown scenario '{0}' (expected one of: list, get, create, update, delete)")]
pub struct UnknownScenario(String);

impl Scenario {
    /// All scenarios, in the order they run by default
    pub const ALL: [Scenario; 5] = [
        Scenario::List,
        Scenario::Get,
        Scenario::Create,
        Scenario::Update,
        Scenario::Delete,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::List => "list",
            Scenario::Get => "get",
            Scenario::Create => "create",
            Scenario::Update => "update",
            Scenario::Delete => "delete",
        }
    }

    /// Run the scenario with a transport of its own, released when it returns
    pub async fn run(&self, config: &Config) -> HarnessResult<()> {
        let client = UsersClient::new(config)?;
        info!("Running scenario '{}'", self.name());
        match self {
            Scenario::List => list_users(&client).await,
            Scenario::Get => get_user(&client).await,
            Scenario::Create => create_user(&client).await,
            Scenario::Update => update_user(&client).await,
            Scenario::Delete => delete_user(&client).await,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownScenario(s.to_string()))
    }
}

/// GET /users returns a non-empty list of users with positive ids
pub async fn list_users(client: &UsersClient) -> HarnessResult<()> {
    const CONTEXT: &str = "list users";

    let response = client.list().await?;
    expect_status(&response, StatusCode::OK, CONTEXT)?;
    let users: Vec<User> = response.json(CONTEXT)?;
    ensure(!users.is_empty(), CONTEXT, || "expected at least one user".to_string())?;
    for user in &users {
        ensure(user.id > 0, CONTEXT, || {
            format!("user <{}> has non-positive id {}", user.email, user.id)
        })?;
    }
    info!("Listed {} users", users.len());
    Ok(())
}

/// GET /users/{id} returns the fixture that was just created
pub async fn get_user(client: &UsersClient) -> HarnessResult<()> {
    with_fixture(client, NewUser::generate(), |fixture| {
        assert_fetched(client, fixture)
    })
    .await
}

async fn assert_fetched(client: &UsersClient, fixture: User) -> HarnessResult<()> {
    const CONTEXT: &str = "get user";

    let response = client.get(fixture.id).await?;
    expect_status(&response, StatusCode::OK, CONTEXT)?;
    let fetched: User = response.json(CONTEXT)?;
    expect_field(CONTEXT, "id", &fixture.id, &fetched.id)?;
    expect_field(CONTEXT, "name", &fixture.name, &fetched.name)?;
    expect_field(CONTEXT, "email", &fixture.email, &fetched.email)?;
    Ok(())
}

/// POST /users creates a user echoing the payload.
///
/// Cleanup finds the created user by its unique email rather than trusting the
/// id in the response under test.
pub async fn create_user(client: &UsersClient) -> HarnessResult<()> {
    let payload = NewUser::generate();
    guarded(
        assert_created(client, &payload),
        delete_by_email_quietly(client, &payload.email),
    )
    .await
}

async fn assert_created(client: &UsersClient, payload: &NewUser) -> HarnessResult<()> {
    const CONTEXT: &str = "create user";

    let response = client.create(payload).await?;
    expect_status(&response, StatusCode::CREATED, CONTEXT)?;
    let created: User = response.json(CONTEXT)?;
    ensure(created.id > 0, CONTEXT, || {
        format!("expected a positive id, got {}", created.id)
    })?;
    expect_field(CONTEXT, "name", &payload.name, &created.name)?;
    expect_field(CONTEXT, "email", &payload.email, &created.email)?;
    expect_field(CONTEXT, "gender", &payload.gender, &created.gender)?;
    expect_field(CONTEXT, "status", &payload.status, &created.status)?;
    info!("Created user {} <{}>", created.id, created.email);
    Ok(())
}

/// PUT /users/{id} replaces name and email and keeps the id
pub async fn update_user(client: &UsersClient) -> HarnessResult<()> {
    with_fixture(client, NewUser::generate(), |fixture| {
        assert_updated(client, fixture)
    })
    .await
}

async fn assert_updated(client: &UsersClient, fixture: User) -> HarnessResult<()> {
    const CONTEXT: &str = "update user";

    let replacement = NewUser::regenerated_from(&fixture);
    let response = client.update(fixture.id, &replacement).await?;
    expect_status(&response, StatusCode::OK, CONTEXT)?;
    let updated: User = response.json(CONTEXT)?;
    expect_field(CONTEXT, "id", &fixture.id, &updated.id)?;
    expect_field(CONTEXT, "name", &replacement.name, &updated.name)?;
    expect_field(CONTEXT, "email", &replacement.email, &updated.email)?;

    // the change must be visible on a fresh read, too
    let response = client.get(fixture.id).await?;
    expect_status(&response, StatusCode::OK, CONTEXT)?;
    let fetched: User = response.json(CONTEXT)?;
    expect_field(CONTEXT, "name", &replacement.name, &fetched.name)?;
    expect_field(CONTEXT, "email", &replacement.email, &fetched.email)?;
    Ok(())
}

/// DELETE /users/{id} returns 204 and the user is gone afterwards.
///
/// The deletion is the act under test, so there is no separate cleanup.
pub async fn delete_user(client: &UsersClient) -> HarnessResult<()> {
    const CONTEXT: &str = "delete user";

    let fixture = create_fixture(client, &NewUser::generate()).await?;

    let response = client.delete(fixture.id).await?;
    expect_status(&response, StatusCode::NO_CONTENT, CONTEXT)?;

    let response = client.get(fixture.id).await?;
    expect_status(&response, StatusCode::NOT_FOUND, "get deleted user")?;

    let response = client.list().await?;
    expect_status(&response, StatusCode::OK, "list after delete")?;
    let users: Vec<User> = response.json("list after delete")?;
    ensure(
        users.iter().all(|user| user.id != fixture.id),
        "list after delete",
        || format!("deleted user {} is still listed", fixture.id),
    )?;
    info!("User {} deleted", fixture.id);
    Ok(())
}
