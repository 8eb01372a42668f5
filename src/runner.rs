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

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{ConfigError, HarnessError, HarnessResult};
use crate::scenarios::Scenario;

/// Exit code for a run that was skipped because it is not configured
pub const EXIT_SKIPPED: i32 = 77;

/// Result of one scenario.
///
/// `Skipped` means the environment is not set up to run it, which is distinct
/// from the API misbehaving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    Passed,
    Failed(String),
    Skipped(String),
}

impl ScenarioOutcome {
    pub fn from_result(result: HarnessResult<()>) -> Self {
        match result {
            Ok(()) => ScenarioOutcome::Passed,
            Err(e) if e.is_configuration() => ScenarioOutcome::Skipped(e.to_string()),
            Err(e) => ScenarioOutcome::Failed(e.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ScenarioOutcome::Failed(_))
    }
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioOutcome::Passed => write!(f, "passed"),
            ScenarioOutcome::Failed(reason) => write!(f, "FAILED: {reason}"),
            ScenarioOutcome::Skipped(reason) => write!(f, "skipped: {reason}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub outcome: ScenarioOutcome,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Passed,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub scenarios: Vec<ScenarioReport>,
}

impl RunReport {
    pub fn count(&self, predicate: impl Fn(&ScenarioOutcome) -> bool) -> usize {
        self.scenarios
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }

    /// Failed if anything failed, skipped if nothing ran, passed otherwise
    pub fn status(&self) -> RunStatus {
        let passed = self.count(|o| *o == ScenarioOutcome::Passed);
        let failed = self.count(ScenarioOutcome::is_failed);
        if failed > 0 {
            RunStatus::Failed
        } else if passed == 0 && !self.scenarios.is_empty() {
            RunStatus::Skipped
        } else {
            RunStatus::Passed
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.status() {
            RunStatus::Passed => 0,
            RunStatus::Failed => 1,
            RunStatus::Skipped => EXIT_SKIPPED,
        }
    }
}

/// Run the given scenarios one after another.
///
/// When the configuration could not be loaded every scenario is reported as
/// skipped without touching the network.
pub async fn run_scenarios(
    config: Result<Config, ConfigError>,
    scenarios: &[Scenario],
) -> RunReport {
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            warn!("Skipping contract run: {}", e);
            let reason = HarnessError::from(e).to_string();
            return RunReport {
                scenarios: scenarios
                    .iter()
                    .map(|scenario| ScenarioReport {
                        scenario: *scenario,
                        outcome: ScenarioOutcome::Skipped(reason.clone()),
                    })
                    .collect(),
            };
        }
    };

    let config = &config;
    run_each(scenarios, move |scenario| async move { scenario.run(config).await }).await
}

/// Run `run` for each scenario in order. A panicking scenario is recorded as
/// failed and the remaining scenarios still run.
async fn run_each<F, Fut>(scenarios: &[Scenario], mut run: F) -> RunReport
where
    F: FnMut(Scenario) -> Fut,
    Fut: Future<Output = HarnessResult<()>>,
{
    let mut report = RunReport::default();
    for scenario in scenarios {
        let outcome = match AssertUnwindSafe(run(*scenario)).catch_unwind().await {
            Ok(result) => ScenarioOutcome::from_result(result),
            Err(panic) => ScenarioOutcome::Failed(format!("panicked: {}", panic_message(&*panic))),
        };
        match &outcome {
            ScenarioOutcome::Passed => info!("Scenario '{}' passed", scenario),
            ScenarioOutcome::Failed(reason) => error!("Scenario '{}' failed: {}", scenario, reason),
            ScenarioOutcome::Skipped(reason) => warn!("Scenario '{}' skipped: {}", scenario, reason),
        }
        report.scenarios.push(ScenarioReport {
            scenario: *scenario,
            outcome,
        });
    }
    report
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
