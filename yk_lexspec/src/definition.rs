/**
 * Named regex definitions, kept in source order.
 */

use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definitions {
    map: IndexMap<String, String>,
}

impl Definitions {
    pub fn new() -> Self {
        Self{ map: IndexMap::new() }
    }

    /// Inserts or overwrites a definition. An overwritten definition keeps
    /// its original position.
    pub fn insert<I, R>(&mut self, identifier: I, regex: R) -> Option<String>
        where I : Into<String>, R : Into<String> {
        self.map.insert(identifier.into(), regex.into())
    }

    pub fn remove(&mut self, identifier: &str) -> Option<String> {
        self.map.shift_remove(identifier)
    }

    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.map.get(identifier).map(String::as_str)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.map.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub(crate) fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.map.get_index(index).map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn regex_at_mut(&mut self, index: usize) -> Option<&mut String> {
        self.map.get_index_mut(index).map(|(_, v)| v)
    }

    pub(crate) fn regexes_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> {
        self.map.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

impl<I, R> std::iter::FromIterator<(I, R)> for Definitions where I : Into<String>, R : Into<String> {
    fn from_iter<T: IntoIterator<Item = (I, R)>>(iter: T) -> Self {
        let mut result = Self::new();
        for (identifier, regex) in iter {
            result.insert(identifier, regex);
        }
        result
    }
}

impl IntoIterator for Definitions {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}
