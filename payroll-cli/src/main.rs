use anyhow::Context;
use clap::Parser;
use tracing::debug;

use payroll_cli::commands::Session;
use payroll_cli::config::Config;
use payroll_cli::{Cli, logging, output};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.quiet);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(level) = cli.log_level.as_deref().or(config.logging.level.as_deref()) {
        logging::set_log_level(level)?;
    }
    if let Some(path) = cli.log_file.as_deref().or(config.logging.file.as_deref()) {
        logging::enable_file_logging(path)?;
    }

    let session = Session::from_config(&config).context("Failed to load tax tables")?;
    debug!(year = session.tables.year, "Tax tables ready");

    debug!(command = cli.command.name(), "Running");
    let value = cli
        .command
        .run(&session)
        .with_context(|| format!("{} failed", cli.command.name()))?;

    print!("{}", output::render(cli.output, &value));
    if cli.output == output::OutputFormat::Json {
        println!();
    }

    Ok(())
}
