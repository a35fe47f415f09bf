pub mod catalog;
pub mod error;
pub mod filter;
pub mod parse;
pub mod resolve;
pub mod selector;

pub use catalog::{load_catalog, suite_names, TestId};
pub use error::{Error, ParseError, Result};
pub use filter::Filter;
pub use parse::{parse_filter, parse_filter_file};
pub use resolve::{resolve_suite_selectors, unknown_suites, SuiteSelectors};
pub use selector::{accepts, normalize, Selector};
