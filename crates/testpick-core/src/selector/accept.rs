use super::Selector;

impl Selector {
    /// Whether a test at `path` carrying `tags` is selected.
    pub fn accepts<P, I, S>(&self, path: &[P], tags: I) -> bool
    where
        P: AsRef<str>,
        I: IntoIterator<Item = S> + Clone,
        S: AsRef<str>,
    {
        match self {
            Self::Union(children) => {
                children.is_empty() || children.iter().any(|c| c.accepts(path, tags.clone()))
            }
            Self::Path(name, inner) => match path.split_first() {
                Some((head, rest)) if head.as_ref() == name => inner.accepts(rest, tags),
                _ => false,
            },
            Self::Tags(names, inner) => {
                let tagged = names.is_empty()
                    || tags
                        .clone()
                        .into_iter()
                        .any(|tag| names.contains(tag.as_ref()));
                tagged && inner.accepts(path, tags)
            }
        }
    }
}

pub fn accepts<P, I, S>(selector: &Selector, path: &[P], tags: I) -> bool
where
    P: AsRef<str>,
    I: IntoIterator<Item = S> + Clone,
    S: AsRef<str>,
{
    selector.accepts(path, tags)
}
