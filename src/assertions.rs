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

use std::fmt::Debug;

use reqwest::StatusCode;

use crate::client::ApiResponse;
use crate::error::{HarnessError, HarnessResult};

/// Fail with `UnexpectedStatus` unless the response has the expected status
pub fn expect_status(
    response: &ApiResponse,
    expected: StatusCode,
    context: &str,
) -> HarnessResult<()> {
    if response.status == expected {
        return Ok(());
    }
    Err(HarnessError::UnexpectedStatus {
        context: context.to_string(),
        expected,
        actual: response.status,
        body: response.body.clone(),
    })
}

/// Fail with an assertion error unless `actual == expected`
pub fn expect_field<T: PartialEq + Debug + ?Sized>(
    context: &str,
    field: &str,
    expected: &T,
    actual: &T,
) -> HarnessResult<()> {
    if expected == actual {
        return Ok(());
    }
    Err(HarnessError::assertion(
        context,
        format!("{field} mismatch: expected {expected:?}, got {actual:?}"),
    ))
}

/// Fail with an assertion error unless `condition` holds
pub fn ensure(condition: bool, context: &str, detail: impl FnOnce() -> String) -> HarnessResult<()> {
    if condition {
        Ok(())
    } else {
        Err(HarnessError::assertion(context, detail()))
    }
}
