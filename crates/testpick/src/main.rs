use anyhow::Result;
use clap::Parser;

use testpick::cli::{Cli, Commands};
use testpick::config::SelectionConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    dispatch(cli.command, SelectionConfig::from_env())
}

fn dispatch(command: Commands, env: SelectionConfig) -> Result<()> {
    match command {
        Commands::Check { filters, files } => {
            let config = filters.into_config(env).with_args(&[], &files);
            testpick::cli::check::run(&config)
        }
        Commands::Resolve {
            suites,
            filters,
            json,
        } => testpick::cli::resolve::run(&suites, &filters.into_config(env), json),
        Commands::Select {
            catalog,
            filters,
            json,
        } => testpick::cli::select::run(&catalog, &filters.into_config(env), json),
    }
}
