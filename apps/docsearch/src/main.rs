mod cli;
mod command;
mod config;
mod error;

use error::WrapErr;

use clap::CommandFactory;
use clap::Parser;
use tracing::Level;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> error::Result<()> {
    color_eyre::install()?;

    let command_line = cli::Cli::parse();
    init_tracing(command_line.verbose);

    let cfg = config::Config::load(command_line.config).context("Load configuration error")?;

    if let Some(command) = command_line.command {
        let cmd: Box<dyn command::Command> = match command {
            cli::Commands::Check { path, strict } => {
                Box::new(command::CheckCommand::new(cfg, path, strict))
            }
            cli::Commands::Search(args) => Box::new(command::SearchCommand::new(cfg, args)),
            cli::Commands::Outline { path, json } => {
                Box::new(command::OutlineCommand::new(cfg, path, json))
            }
            cli::Commands::Stats { path, json } => {
                Box::new(command::StatsCommand::new(cfg, path, json))
            }
            cli::Commands::Dump {
                path,
                json,
                pretty,
                output,
            } => Box::new(command::DumpCommand::new(cfg, path, json, pretty, output)),
        };
        cmd.execute().await?;
    } else {
        cli::Cli::command().print_help()?;
    }

    Ok(())
}
