//! The filter grammar.
//!
//! ```text
//! filter      := [suite-list "::"] [path] ["@" tag-list]
//! suite-list  := name ("," name)*
//! path        := name ("." name)*
//! tag-list    := name ("," name)*
//! name        := one or more alphanumeric characters
//! ```
//!
//! Filter files hold one expression per line. `#` starts a comment running to
//! the end of the line; blank and comment-only lines are skipped.

use std::collections::BTreeSet;

use crate::error::ParseError;
use crate::filter::Filter;
use crate::selector::Selector;

const COMMENT: char = '#';

struct Failure {
    at: usize,
    message: String,
}

impl Failure {
    fn new(at: usize, message: impl Into<String>) -> Self {
        Self {
            at,
            message: message.into(),
        }
    }
}

type Step<T> = std::result::Result<T, Failure>;

/// Parses a single filter expression.
///
/// ```
/// use testpick_core::{parse_filter, Selector};
///
/// let filter = parse_filter("-", "SuiteA,SuiteB::Foo").unwrap();
/// assert_eq!(filter.suites.len(), 2);
/// assert_eq!(filter.selector, Selector::from_path(["Foo"]));
/// ```
pub fn parse_filter(source_name: &str, text: &str) -> Result<Filter, ParseError> {
    parse_expression(text).map_err(|f| ParseError::new(source_name, 1, f.at + 1, f.message))
}

/// Parses a filter file. The first malformed line fails the whole file.
pub fn parse_filter_file(source_name: &str, text: &str) -> Result<Vec<Filter>, ParseError> {
    let mut filters = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split_once(COMMENT).map_or(raw, |(before, _)| before);
        let trimmed = content.trim_start();
        let expression = trimmed.trim_end();
        if expression.is_empty() {
            continue;
        }

        let offset = content.chars().count() - trimmed.chars().count();
        let filter = parse_expression(expression).map_err(|f| {
            ParseError::new(source_name, line, offset + f.at + 1, f.message)
        })?;

        tracing::trace!(source = source_name, line, %filter, "parsed filter");
        filters.push(filter);
    }

    Ok(filters)
}

fn parse_expression(text: &str) -> Step<Filter> {
    let input: Vec<char> = text.chars().collect();
    let mut pos = 0;

    let suites = parse_suite_list(&input, &mut pos);
    let path = parse_path(&input, &mut pos)?;
    let tags = parse_tags(&input, &mut pos)?;

    if let Some(&ch) = input.get(pos) {
        let message = if ch == ',' {
            "unexpected ','; a suite list must be followed by '::'".to_string()
        } else {
            format!("unexpected character '{ch}'")
        };
        return Err(Failure::new(pos, message));
    }

    let leaf = if tags.is_empty() {
        Selector::all()
    } else {
        Selector::Tags(tags, Box::new(Selector::all()))
    };

    Ok(Filter {
        suites,
        selector: Selector::within(path, leaf),
    })
}

/// Consumes `name ("," name)* "::"` if present, otherwise leaves `pos` alone.
fn parse_suite_list(input: &[char], pos: &mut usize) -> BTreeSet<String> {
    let mut cursor = *pos;
    let mut suites = BTreeSet::new();

    loop {
        let Some(name) = parse_name(input, &mut cursor) else {
            return BTreeSet::new();
        };
        suites.insert(name);

        match input.get(cursor) {
            Some(',') => cursor += 1,
            Some(':') if input.get(cursor + 1) == Some(&':') => {
                *pos = cursor + 2;
                return suites;
            }
            _ => return BTreeSet::new(),
        }
    }
}

fn parse_path(input: &[char], pos: &mut usize) -> Step<Vec<String>> {
    let mut segments = Vec::new();
    let Some(first) = parse_name(input, pos) else {
        return Ok(segments);
    };
    segments.push(first);

    while input.get(*pos) == Some(&'.') {
        *pos += 1;
        let name = parse_name(input, pos)
            .ok_or_else(|| Failure::new(*pos, "expected a group name after '.'"))?;
        segments.push(name);
    }

    Ok(segments)
}

fn parse_tags(input: &[char], pos: &mut usize) -> Step<BTreeSet<String>> {
    let mut tags = BTreeSet::new();
    if input.get(*pos) != Some(&'@') {
        return Ok(tags);
    }
    *pos += 1;

    loop {
        let tag = parse_name(input, pos).ok_or_else(|| {
            let after = input[*pos - 1];
            Failure::new(*pos, format!("expected a tag name after '{after}'"))
        })?;
        tags.insert(tag);

        if input.get(*pos) == Some(&',') {
            *pos += 1;
        } else {
            return Ok(tags);
        }
    }
}

fn parse_name(input: &[char], pos: &mut usize) -> Option<String> {
    let start = *pos;
    while input.get(*pos).is_some_and(|ch| ch.is_alphanumeric()) {
        *pos += 1;
    }
    (*pos > start).then(|| input[start..*pos].iter().collect())
}
