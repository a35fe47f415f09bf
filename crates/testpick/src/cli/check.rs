use anyhow::{bail, Result};
use console::style;
use testpick_core::{normalize, Filter};

use crate::config::{load_source, FilterSource, SelectionConfig};

pub fn run(config: &SelectionConfig) -> Result<()> {
    if config.is_empty() {
        bail!("no filters given (use --filter, --filter-file or a file argument)");
    }

    let mut total = 0;
    for source in &config.sources {
        let filters = load_source(source)?;
        println!(
            "{} {} ({} filters)",
            style("✓").green(),
            describe(source),
            filters.len()
        );
        for filter in &filters {
            println!("  {}", canonical(filter));
        }
        total += filters.len();
    }

    eprintln!("{total} filters OK");
    Ok(())
}

fn describe(source: &FilterSource) -> String {
    match source {
        FilterSource::Expression { origin, text } => format!("{origin} '{text}'"),
        FilterSource::File(path) => path.display().to_string(),
    }
}

fn canonical(filter: &Filter) -> Filter {
    Filter {
        suites: filter.suites.clone(),
        selector: normalize(&filter.selector),
    }
}
