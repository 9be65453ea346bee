//! Result shape of entity lookups

/// Entities found by a `get` call
///
/// The variant follows the request: a scalar id yields `One`, anything else
/// yields `Many`, even when exactly one entity matched.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// Lookup by a single id; `None` when nothing matched
    One(Option<T>),
    /// Lookup by a list of ids or by filter
    Many(Vec<T>),
}

impl<T> Lookup<T> {
    /// True for a single-id lookup that matched nothing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::One(None))
    }

    pub fn len(&self) -> usize {
        match self {
            Lookup::One(found) => usize::from(found.is_some()),
            Lookup::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The single entity, or the first of a collection
    pub fn into_single(self) -> Option<T> {
        match self {
            Lookup::One(found) => found,
            Lookup::Many(items) => items.into_iter().next(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Lookup::One(found) => found.into_iter().collect(),
            Lookup::Many(items) => items,
        }
    }
}
