use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = arrivals::cli::Cli::parse();
    let config = arrivals::config::from_cli(&cli)?;

    match cli.command.clone() {
        Some(arrivals::cli::CliCommand::Tui) | None => {
            arrivals::logging::init_file(&config, cli.log_filter.clone())?;
            arrivals::tui::run(config)?;
        }
        Some(command) => {
            arrivals::logging::init_stderr(cli.log_filter.clone())?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            arrivals::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
