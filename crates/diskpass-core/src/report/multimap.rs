//! Insertion-ordered map from a key to a growable list of values.

use std::collections::HashMap;
use std::hash::Hash;

/// Keys iterate in first-insertion order; values in append order.
#[derive(Debug, Clone)]
pub struct OrderedMultiMap<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, Vec<V>)>,
}

impl<K, V> Default for OrderedMultiMap<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> OrderedMultiMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the list under `key`, creating the list on first use.
    pub fn insert_or_append(&mut self, key: K, value: V) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1.push(value),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![value]));
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.index.get(key).map(|&slot| self.entries[slot].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

impl<K, V> IntoIterator for OrderedMultiMap<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = std::vec::IntoIter<(K, Vec<V>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
