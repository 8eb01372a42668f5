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

//! Fixture lifecycle: creation, best-effort deletion, and the scoped
//! acquisition that ties the two together around a scenario body.

use std::future::Future;
use std::panic::{AssertUnwindSafe, resume_unwind};

use futures::FutureExt;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::assertions::expect_status;
use crate::client::UsersClient;
use crate::error::HarnessResult;
use crate::types::{NewUser, User};

/// Create a user and return it with its server-assigned id.
///
/// Anything but `201 Created` with a parseable user body is an error.
pub async fn create_fixture(client: &UsersClient, payload: &NewUser) -> HarnessResult<User> {
    let response = client.create(payload).await?;
    expect_status(&response, StatusCode::CREATED, "create fixture")?;
    let user: User = response.json("create fixture")?;
    info!("Created fixture user {} <{}>", user.id, user.email);
    Ok(user)
}

/// Delete a user, ignoring the outcome. Runs on cleanup paths, so failures are
/// logged and never reported.
pub async fn delete_quietly(client: &UsersClient, id: i64) {
    match client.delete(id).await {
        Ok(response) if response.status == StatusCode::NO_CONTENT => {
            info!("Deleted fixture user {}", id);
        }
        Ok(response) => {
            warn!(
                "Cleanup of user {} returned {} (body: {})",
                id, response.status, response.body
            );
        }
        Err(e) => {
            warn!("Cleanup of user {} failed: {}", id, e);
        }
    }
}

/// Look a user up by its unique email
pub async fn find_by_email(client: &UsersClient, email: &str) -> HarnessResult<Option<User>> {
    let response = client.list_by_email(email).await?;
    expect_status(&response, StatusCode::OK, "find user by email")?;
    let users: Vec<User> = response.json("find user by email")?;
    // the server-side filter may match partially
    Ok(users.into_iter().find(|user| user.email == email))
}

/// Delete whichever user carries `email`, if any. Best effort.
pub async fn delete_by_email_quietly(client: &UsersClient, email: &str) {
    match find_by_email(client, email).await {
        Ok(Some(user)) => delete_quietly(client, user.id).await,
        Ok(None) => debug!("No user with email {} to clean up", email),
        Err(e) => warn!("Cleanup lookup for {} failed: {}", email, e),
    }
}

/// Run `body`, then run `cleanup` on every exit path: success, error, or panic.
///
/// A panic in `body` is resumed once cleanup has finished. Cleanup itself
/// cannot fail, so it never masks the body's result.
pub async fn guarded<T, B, C>(body: B, cleanup: C) -> HarnessResult<T>
where
    B: Future<Output = HarnessResult<T>>,
    C: Future<Output = ()>,
{
    let outcome = AssertUnwindSafe(body).catch_unwind().await;
    cleanup.await;
    match outcome {
        Ok(result) => result,
        Err(panic) => resume_unwind(panic),
    }
}

/// Scoped acquisition of a fixture.
///
/// Creates a user from `payload`, hands a copy to `body`, and deletes the user
/// once `body` has finished, whatever its outcome. If creation itself fails
/// there is nothing to release and the creation error is returned.
pub async fn with_fixture<T, F, Fut>(
    client: &UsersClient,
    payload: NewUser,
    body: F,
) -> HarnessResult<T>
where
    F: FnOnce(User) -> Fut,
    Fut: Future<Output = HarnessResult<T>>,
{
    let fixture = create_fixture(client, &payload).await?;
    let id = fixture.id;
    guarded(body(fixture), delete_quietly(client, id)).await
}
