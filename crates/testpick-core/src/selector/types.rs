use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// A predicate over tests identified by their group path and tag set.
///
/// Children and tag names live in ordered sets, so two selectors built from
/// the same parts in a different order compare (and print) identically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    /// Accepts a test when any child does. The empty union accepts everything.
    Union(BTreeSet<Selector>),
    /// Accepts a test whose first path segment matches and whose remaining
    /// path the inner selector accepts.
    Path(String, Box<Selector>),
    /// Accepts a test carrying at least one of the tags (any test when the set
    /// is empty) that the inner selector also accepts.
    Tags(BTreeSet<String>, Box<Selector>),
}

impl Selector {
    pub const fn all() -> Self {
        Self::Union(BTreeSet::new())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::Union(children) if children.is_empty())
    }

    pub fn path(name: impl Into<String>, inner: Self) -> Self {
        Self::Path(name.into(), Box::new(inner))
    }

    pub fn tags<I, S>(names: I, inner: Self) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Tags(names.into_iter().map(Into::into).collect(), Box::new(inner))
    }

    pub fn union<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Union(children.into_iter().collect())
    }

    /// `["a", "b"]` becomes `Path a (Path b All)`.
    pub fn from_path<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: DoubleEndedIterator,
        S: Into<String>,
    {
        Self::within(segments, Self::all())
    }

    /// Nests `inner` under one `Path` step per segment, outermost first.
    pub fn within<I, S>(segments: I, inner: Self) -> Self
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: DoubleEndedIterator,
        S: Into<String>,
    {
        segments
            .into_iter()
            .rev()
            .fold(inner, |acc, segment| Self::path(segment, acc))
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Union(children) if children.is_empty() => write!(f, "*"),
            Self::Union(children) => {
                write!(f, "{{")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, "}}")
            }
            Self::Path(name, inner) => {
                write!(f, "{name}")?;
                match inner.as_ref() {
                    inner if inner.is_all() => Ok(()),
                    Self::Tags(_, rest) if rest.is_all() => write!(f, "{inner}"),
                    inner => write!(f, ".{inner}"),
                }
            }
            Self::Tags(names, inner) => {
                if !inner.is_all() {
                    write!(f, "{inner}")?;
                }
                write!(f, "@")?;
                write_names(f, names)
            }
        }
    }
}

pub(crate) fn write_names(f: &mut fmt::Formatter<'_>, names: &BTreeSet<String>) -> fmt::Result {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{name}")?;
    }
    Ok(())
}
