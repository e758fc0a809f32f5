use anyhow::Result;
use clap::Parser;
use cmc::cli::{Cli, Commands};
use cmc::commands;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compile {
            path,
            source,
            target,
            name,
            blacklist,
            plugins,
        } => {
            commands::compile::run(commands::compile::CompileArgs {
                path,
                source,
                target,
                name,
                blacklist,
                plugins,
            });
        }
    }

    Ok(())
}
