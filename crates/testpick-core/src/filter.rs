use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ParseError;
use crate::parse::parse_filter;
use crate::selector::{write_names, Selector};

/// A selector scoped to a set of suites. No suites means every suite.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Filter {
    pub suites: BTreeSet<String>,
    pub selector: Selector,
}

impl Filter {
    pub const fn universal(selector: Selector) -> Self {
        Self {
            suites: BTreeSet::new(),
            selector,
        }
    }

    pub fn scoped<I, S>(suites: I, selector: Selector) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suites: suites.into_iter().map(Into::into).collect(),
            selector,
        }
    }

    pub fn is_universal(&self) -> bool {
        self.suites.is_empty()
    }

    pub fn applies_to(&self, suite: &str) -> bool {
        self.is_universal() || self.suites.contains(suite)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_universal() {
            return write!(f, "{}", self.selector);
        }
        write_names(f, &self.suites)?;
        write!(f, "::")?;
        if self.selector.is_all() {
            Ok(())
        } else {
            write!(f, "{}", self.selector)
        }
    }
}

impl FromStr for Filter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_filter("-", s)
    }
}
