//! `rbac-admin` entry-point: loads settings, opens the snapshot directory and
//! runs one command.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use ortho_config::OrthoConfig;
use rbac_admin::config::AdminSettings;
use rbac_admin::inbound::cli::{Cli, CliError, open_store, run};
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match AdminSettings::load_from_iter([OsString::from("rbac-admin")]) {
        Ok(settings) => settings,
        Err(err) => {
            init_tracing(false);
            return report(&CliError::Config {
                message: err.to_string(),
            });
        }
    };
    init_tracing(settings.json_logs);

    match execute(cli, &settings) {
        Ok(lines) => {
            let mut stdout = io::stdout().lock();
            for line in lines {
                if let Err(err) = writeln!(stdout, "{line}") {
                    warn!(error = %err, "failed to write output");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}

fn execute(cli: Cli, settings: &AdminSettings) -> Result<Vec<String>, CliError> {
    let mut store = open_store(settings.resolve_data_dir(cli.data_dir))?;
    run(cli.command, &mut store)
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = result {
        warn!(error = %err, "tracing init failed");
    }
}

fn report(err: &CliError) -> ExitCode {
    error!(error = %err, "command failed");
    let mut stderr = io::stderr().lock();
    if writeln!(stderr, "error: {err}").is_err() {
        // Nothing left to report to.
    }
    ExitCode::FAILURE
}
