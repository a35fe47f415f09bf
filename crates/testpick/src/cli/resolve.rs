use anyhow::Result;
use console::style;
use testpick_core::resolve_suite_selectors;

use super::warn_unknown_suites;
use crate::config::SelectionConfig;

pub fn run(suites: &[String], config: &SelectionConfig, json: bool) -> Result<()> {
    let filters = config.load_filters()?;
    warn_unknown_suites(suites, &filters);

    let resolved = resolve_suite_selectors(suites, &filters);

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    for suite in suites {
        match resolved.get(suite) {
            Some(selector) => println!("{suite}: {selector}"),
            None => println!("{suite}: {}", style("(nothing selected)").dim()),
        }
    }

    Ok(())
}
