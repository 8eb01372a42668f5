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

use clap::Parser;
use clap_derive::Parser;
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;

use users_contract::config::DEFAULT_BASE_URL;
use users_contract::{Config, RunStatus, Scenario, run_scenarios};

#[derive(Parser, Debug)]
#[command(about = "Verify the CRUD contract of a remote users API")]
struct Args {
    #[arg(long, help = "Base URL of the API under test", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(
        long = "scenario",
        help = "Run only this scenario (list, get, create, update, delete); repeatable"
    )]
    scenarios: Vec<Scenario>,

    #[arg(long, help = "Enable debug logging", default_value = "false")]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), eyre::Error> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    let main_subscriber = tracing_subscriber::fmt()
        .compact()
        .with_ansi(true)
        .with_file(true)
        .with_target(false)
        .with_line_number(true)
        .with_span_events(FmtSpan::NONE)
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(main_subscriber)?;

    let scenarios = if args.scenarios.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        args.scenarios
    };

    let report = run_scenarios(Config::from_env_with_base_url(&args.base_url), &scenarios).await;

    for entry in &report.scenarios {
        println!("{:<8} {}", entry.scenario, entry.outcome);
    }
    let status = report.status();
    match status {
        RunStatus::Passed => info!("All {} scenarios passed", report.scenarios.len()),
        RunStatus::Failed => info!("Contract run failed"),
        RunStatus::Skipped => info!("Contract run skipped: configuration missing"),
    }

    std::process::exit(report.exit_code());
}
