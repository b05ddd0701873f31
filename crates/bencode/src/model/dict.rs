//! Dictionary type for bencode values.

use std::borrow::Cow;
use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxHasher;

use crate::model::Value;

type Entries<'a> = IndexMap<Cow<'a, [u8]>, Value<'a>, BuildHasherDefault<FxHasher>>;

/// A bencode dictionary: byte string keys mapped to values.
///
/// Entries keep insertion order (for decoded values, the order keys appeared
/// in the input). Keys are unique. Encoding always writes entries in
/// ascending byte order of key, and equality ignores entry order.
#[derive(Debug, Clone, Default)]
pub struct Dictionary<'a> {
    entries: Entries<'a>,
}

impl<'a> Dictionary<'a> {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty dictionary with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Entries::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Option<&Value<'a>> {
        self.entries.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut Value<'a>> {
        self.entries.get_mut(key)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts an entry, replacing and returning any previous value for the key.
    ///
    /// A replaced entry keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<Cow<'a, [u8]>>,
        value: impl Into<Value<'a>>,
    ) -> Option<Value<'a>> {
        self.entries.insert(key.into(), value.into())
    }

    /// Inserts an entry only if the key is absent.
    ///
    /// On a duplicate key the dictionary is unchanged and the rejected value
    /// is handed back.
    pub fn try_insert(
        &mut self,
        key: impl Into<Cow<'a, [u8]>>,
        value: impl Into<Value<'a>>,
    ) -> Result<(), Value<'a>> {
        match self.entries.entry(key.into()) {
            Entry::Occupied(_) => Err(value.into()),
            Entry::Vacant(slot) => {
                slot.insert(value.into());
                Ok(())
            }
        }
    }

    /// Appends an entry whose key the caller has already checked is unique.
    pub(crate) fn push_unique(&mut self, key: Cow<'a, [u8]>, value: Value<'a>) {
        let replaced = self.entries.insert(key, value);
        debug_assert!(replaced.is_none());
    }

    /// Removes the entry for `key`, preserving the order of the rest.
    pub fn remove(&mut self, key: &[u8]) -> Option<Value<'a>> {
        self.entries.shift_remove(key)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Value<'a>)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.keys().map(|k| k.as_ref())
    }

    /// Returns the entries in canonical order (ascending byte order of key).
    pub fn sorted_entries(&self) -> Vec<(&[u8], &Value<'a>)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_unstable_by(|a, b| a.0.cmp(b.0));
        sorted
    }

    /// Returns true if insertion order is already canonical order.
    pub fn is_sorted(&self) -> bool {
        self.keys().zip(self.keys().skip(1)).all(|(a, b)| a < b)
    }

    /// Converts into a dictionary that owns all of its data.
    pub fn into_owned(self) -> Dictionary<'static> {
        let mut owned = Dictionary::with_capacity(self.len());
        for (k, v) in self.entries {
            owned.push_unique(Cow::Owned(k.into_owned()), v.into_owned());
        }
        owned
    }
}

impl PartialEq for Dictionary<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.entries.get(k) == Some(v))
    }
}

impl Eq for Dictionary<'_> {}

impl<'a, K, V> FromIterator<(K, V)> for Dictionary<'a>
where
    K: Into<Cow<'a, [u8]>>,
    V: Into<Value<'a>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut dict = Dictionary::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}

impl<'a> IntoIterator for Dictionary<'a> {
    type Item = (Cow<'a, [u8]>, Value<'a>);
    type IntoIter = indexmap::map::IntoIter<Cow<'a, [u8]>, Value<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
