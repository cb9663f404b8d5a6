use std::io::Write;
use std::process::ExitCode;

use chatlog::{ChatlogConfig, Cli, Outcome};
use chatlog_logging::ChatlogSubscriberBuilder;
use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = ChatlogConfig::resolve(&cli)?;

    ChatlogSubscriberBuilder::new()
        .with_config(config.log.clone())
        .init()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = chatlog::run(&cli.command, config.activity_log, &mut out)?;
    out.flush()?;

    Ok(match outcome {
        Outcome::Done => ExitCode::SUCCESS,
        Outcome::NotFound => ExitCode::FAILURE,
    })
}
