use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use testpick_core::{parse_filter, parse_filter_file, Filter};

/// Filter expressions separated by `;`.
pub const FILTERS_VAR: &str = "TESTPICK_FILTERS";
/// Filter file paths in the platform's path-list format.
pub const FILTER_FILES_VAR: &str = "TESTPICK_FILTER_FILES";

/// Where a filter comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSource {
    Expression { origin: String, text: String },
    File(PathBuf),
}

/// Every filter source for a run, in the order they are read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionConfig {
    pub sources: Vec<FilterSource>,
}

impl SelectionConfig {
    pub fn from_env() -> Self {
        Self::from_vars(env::var(FILTERS_VAR).ok(), env::var_os(FILTER_FILES_VAR))
    }

    fn from_vars(filters: Option<String>, files: Option<OsString>) -> Self {
        let mut sources: Vec<FilterSource> = filters
            .as_deref()
            .unwrap_or("")
            .split(';')
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| FilterSource::Expression {
                origin: FILTERS_VAR.to_string(),
                text: text.to_string(),
            })
            .collect();

        if let Some(files) = files {
            sources.extend(
                env::split_paths(&files)
                    .filter(|path| !path.as_os_str().is_empty())
                    .map(FilterSource::File),
            );
        }

        Self { sources }
    }

    /// Appends command-line sources after the environment's.
    #[must_use]
    pub fn with_args(mut self, expressions: &[String], files: &[PathBuf]) -> Self {
        self.sources
            .extend(expressions.iter().map(|text| FilterSource::Expression {
                origin: "--filter".to_string(),
                text: text.clone(),
            }));
        self.sources
            .extend(files.iter().cloned().map(FilterSource::File));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Parses every source. Any parse error aborts the whole load.
    pub fn load_filters(&self) -> Result<Vec<Filter>> {
        let mut filters = Vec::new();
        for source in &self.sources {
            filters.extend(load_source(source)?);
        }
        tracing::debug!(count = filters.len(), "loaded filters");
        Ok(filters)
    }
}

pub fn load_source(source: &FilterSource) -> Result<Vec<Filter>> {
    match source {
        FilterSource::Expression { origin, text } => Ok(vec![parse_filter(origin, text)?]),
        FilterSource::File(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read filter file {}", path.display()))?;
            Ok(parse_filter_file(&path.display().to_string(), &text)?)
        }
    }
}
