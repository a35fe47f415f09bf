pub mod check;
pub mod resolve;
pub mod select;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use console::style;

use crate::config::SelectionConfig;

#[derive(Parser)]
#[command(
    name = "tpick",
    about = "Combine test filters into per-suite selections",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse filters and print them in canonical form
    Check {
        #[command(flatten)]
        filters: FilterArgs,
        /// Filter files to check
        #[arg(id = "check_files", value_name = "FILES")]
        files: Vec<PathBuf>,
    },
    /// Print the normalized selector for each suite
    Resolve {
        /// Suite name (repeat for each suite)
        #[arg(short = 's', long = "suite", required = true)]
        suites: Vec<String>,
        #[command(flatten)]
        filters: FilterArgs,
        /// Print the selectors as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the tests in a catalog that the filters select
    Select {
        /// JSON test catalog
        #[arg(short = 'c', long = "catalog")]
        catalog: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
        /// Print the selected tests as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Filter expression, e.g. `SuiteA::Group.Case@slow`
    #[arg(short = 'f', long = "filter")]
    pub expressions: Vec<String>,
    /// File with one filter expression per line
    #[arg(long = "filter-file")]
    pub files: Vec<PathBuf>,
}

impl FilterArgs {
    pub fn into_config(self, env: SelectionConfig) -> SelectionConfig {
        env.with_args(&self.expressions, &self.files)
    }
}

pub(crate) fn warn_unknown_suites<S: AsRef<str>>(suites: &[S], filters: &[testpick_core::Filter]) {
    for suite in testpick_core::unknown_suites(suites, filters) {
        eprintln!(
            "{} filters mention unknown suite '{suite}'",
            style("!").yellow()
        );
    }
}
