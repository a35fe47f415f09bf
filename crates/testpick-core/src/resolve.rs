use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::catalog::TestId;
use crate::filter::Filter;
use crate::selector::{normalize, Selector};

/// The normalized selector for each suite that has one.
///
/// A suite without an entry selects nothing. That is different from an entry
/// holding [`Selector::all`], so look suites up with [`Self::get`] or
/// [`Self::accepts`] rather than defaulting a missing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SuiteSelectors {
    selectors: BTreeMap<String, Selector>,
}

impl SuiteSelectors {
    pub fn get(&self, suite: &str) -> Option<&Selector> {
        self.selectors.get(suite)
    }

    pub fn contains(&self, suite: &str) -> bool {
        self.selectors.contains_key(suite)
    }

    /// Whether a test in `suite` at `path` carrying `tags` is selected.
    /// Always false for a suite without an entry.
    pub fn accepts<P, I, S>(&self, suite: &str, path: &[P], tags: I) -> bool
    where
        P: AsRef<str>,
        I: IntoIterator<Item = S> + Clone,
        S: AsRef<str>,
    {
        self.get(suite)
            .is_some_and(|selector| selector.accepts(path, tags))
    }

    /// The tests the resolved selectors accept, in input order.
    pub fn select<'a>(&self, tests: &'a [TestId]) -> Vec<&'a TestId> {
        tests
            .iter()
            .filter(|test| self.accepts(&test.suite, &test.path, &test.tags))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selector)> {
        self.selectors.iter().map(|(suite, s)| (suite.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Selector> {
        self.selectors
    }
}

/// Combines `filters` into one normalized selector per suite.
///
/// With no filters at all, every suite selects everything. Otherwise a suite
/// gets the union of every universal filter and every filter naming it, and
/// a suite with neither gets no entry.
///
/// Filters naming suites outside `all_suites` are ignored with a warning.
pub fn resolve_suite_selectors<S: AsRef<str>>(
    all_suites: &[S],
    filters: &[Filter],
) -> SuiteSelectors {
    if filters.is_empty() {
        tracing::debug!("no filters given, selecting every suite");
        return SuiteSelectors {
            selectors: all_suites
                .iter()
                .map(|suite| (suite.as_ref().to_string(), Selector::all()))
                .collect(),
        };
    }

    for suite in unknown_suites(all_suites, filters) {
        tracing::warn!(suite = %suite, "filter names a suite that does not exist");
    }

    let universal: Vec<&Selector> = filters
        .iter()
        .filter(|f| f.is_universal())
        .map(|f| &f.selector)
        .collect();

    let mut selectors = BTreeMap::new();
    for suite in all_suites {
        let suite = suite.as_ref();
        let contributing: Vec<Selector> = universal
            .iter()
            .copied()
            .chain(
                filters
                    .iter()
                    .filter(|f| f.suites.contains(suite))
                    .map(|f| &f.selector),
            )
            .cloned()
            .collect();

        if contributing.is_empty() {
            tracing::debug!(suite, "no filter applies, selecting nothing");
            continue;
        }

        let selector = normalize(&Selector::union(contributing));
        tracing::debug!(suite, %selector, "resolved suite selector");
        selectors.insert(suite.to_string(), selector);
    }

    SuiteSelectors { selectors }
}

/// Suite names that filters mention but `all_suites` does not contain.
pub fn unknown_suites<S: AsRef<str>>(all_suites: &[S], filters: &[Filter]) -> BTreeSet<String> {
    let known: BTreeSet<&str> = all_suites.iter().map(|s| s.as_ref()).collect();
    filters
        .iter()
        .flat_map(|f| f.suites.iter())
        .filter(|suite| !known.contains(suite.as_str()))
        .cloned()
        .collect()
}
