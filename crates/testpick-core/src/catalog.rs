use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A candidate test: its suite, group path and tags.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TestId {
    pub suite: String,
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl TestId {
    pub fn new<P, T>(
        suite: impl Into<String>,
        path: impl IntoIterator<Item = P>,
        tags: impl IntoIterator<Item = T>,
    ) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        Self {
            suite: suite.into(),
            path: path.into_iter().map(Into::into).collect(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.suite, self.path.join("."))
    }
}

/// Reads a JSON array of tests.
pub fn load_catalog(json: &str) -> Result<Vec<TestId>> {
    Ok(serde_json::from_str(json)?)
}

/// Distinct suite names in the order they sort.
pub fn suite_names(tests: &[TestId]) -> Vec<String> {
    tests
        .iter()
        .map(|t| t.suite.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
