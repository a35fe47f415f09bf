use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use testpick_core::{load_catalog, resolve_suite_selectors, suite_names};

use super::warn_unknown_suites;
use crate::config::SelectionConfig;

/// Counts for the closing summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    pub selected: usize,
    pub total: usize,
}

pub fn run(catalog: &Path, config: &SelectionConfig, json: bool) -> Result<()> {
    let text = fs::read_to_string(catalog)
        .with_context(|| format!("failed to read catalog {}", catalog.display()))?;
    let tests = load_catalog(&text)
        .with_context(|| format!("failed to load catalog {}", catalog.display()))?;

    let filters = config.load_filters()?;
    let suites = suite_names(&tests);
    warn_unknown_suites(&suites, &filters);

    let resolved = resolve_suite_selectors(&suites, &filters);
    let selected = resolved.select(&tests);

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
    } else {
        for test in &selected {
            println!("{test}");
        }
    }

    print_summary(SelectionSummary {
        selected: selected.len(),
        total: tests.len(),
    });
    Ok(())
}

fn print_summary(summary: SelectionSummary) {
    eprintln!(
        "{} of {} tests selected",
        summary.selected, summary.total
    );
}
