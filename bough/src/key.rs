//! Node keys and key sets.
//!
//! Keys identify nodes across the engine's state. They are unique by
//! convention only: two nodes sharing a key share their open/selected state.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Identifier of a tree node.
///
/// Equality is strict: `Text("1")` and `Number(1)` are different keys, and so
/// are `1` and `1.0`. Their string forms only meet in
/// [`is_subset_by_string_containment`].
///
/// [`is_subset_by_string_containment`]: crate::key_set::is_subset_by_string_containment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeKey {
    /// Numeric key. Any JSON number is kept as written: integers of either
    /// sign and fractions.
    Number(Number),
    /// Text key.
    Text(String),
}

impl fmt::Display for TreeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeKey::Number(n) => write!(f, "{}", n),
            TreeKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TreeKey {
    fn from(value: &str) -> Self {
        TreeKey::Text(value.to_string())
    }
}

impl From<String> for TreeKey {
    fn from(value: String) -> Self {
        TreeKey::Text(value)
    }
}

impl From<i64> for TreeKey {
    fn from(value: i64) -> Self {
        TreeKey::Number(value.into())
    }
}

impl From<Number> for TreeKey {
    fn from(value: Number) -> Self {
        TreeKey::Number(value)
    }
}

/// An insertion-ordered set of keys.
///
/// Duplicates are dropped on insert. Equality ignores order, but iteration
/// and [`KeySet::joined`] follow insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<TreeKey>", into = "Vec<TreeKey>")]
pub struct KeySet {
    keys: Vec<TreeKey>,
}

impl KeySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys in the set.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the set has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check if a key is in the set.
    pub fn contains(&self, key: &TreeKey) -> bool {
        self.keys.contains(key)
    }

    /// Append a key. Returns false if it was already present.
    pub fn insert(&mut self, key: TreeKey) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Remove a key. Returns false if it was absent.
    pub fn remove(&mut self, key: &TreeKey) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        self.keys.len() != before
    }

    /// Keep only the keys matching the predicate.
    pub fn retain(&mut self, f: impl FnMut(&TreeKey) -> bool) {
        self.keys.retain(f);
    }

    /// Iterate keys in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TreeKey> {
        self.keys.iter()
    }

    /// Keys as a slice, in insertion order.
    pub fn as_slice(&self) -> &[TreeKey] {
        &self.keys
    }

    /// String forms of all keys joined with `,`.
    pub fn joined(&self) -> String {
        self.keys
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl PartialEq for KeySet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|k| other.contains(k))
    }
}

impl Eq for KeySet {}

impl Extend<TreeKey> for KeySet {
    fn extend<I: IntoIterator<Item = TreeKey>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Into<TreeKey>> FromIterator<K> for KeySet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = KeySet::new();
        set.extend(iter.into_iter().map(Into::into));
        set
    }
}

impl From<Vec<TreeKey>> for KeySet {
    fn from(keys: Vec<TreeKey>) -> Self {
        keys.into_iter().collect()
    }
}

impl From<KeySet> for Vec<TreeKey> {
    fn from(set: KeySet) -> Self {
        set.keys
    }
}

impl<'a> IntoIterator for &'a KeySet {
    type Item = &'a TreeKey;
    type IntoIter = std::slice::Iter<'a, TreeKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl IntoIterator for KeySet {
    type Item = TreeKey;
    type IntoIter = std::vec::IntoIter<TreeKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_drops_duplicates() {
        let mut set = KeySet::new();
        assert!(set.insert("a".into()));
        assert!(!set.insert("a".into()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: KeySet = ["x", "y"].into_iter().collect();
        let b: KeySet = ["y", "x"].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_and_number_keys_differ() {
        assert_ne!(TreeKey::from("1"), TreeKey::from(1_i64));
        assert_eq!(TreeKey::from("1").to_string(), TreeKey::from(1_i64).to_string());
    }

    #[test]
    fn test_joined_follows_insertion_order() {
        let set: KeySet = [TreeKey::from(2_i64), TreeKey::from("b"), TreeKey::from(1_i64)]
            .into_iter()
            .collect();
        assert_eq!(set.joined(), "2,b,1");
    }

    #[test]
    fn test_fractional_and_large_numbers_kept() {
        let set: KeySet = serde_json::from_str(r#"[1.5, 18446744073709551615, -3]"#).unwrap();
        assert_eq!(set.joined(), "1.5,18446744073709551615,-3");
        assert_ne!(set.as_slice()[0], TreeKey::from(1_i64));
    }

    #[test]
    fn test_fraction_matches_by_string_form() {
        let fraction: TreeKey = serde_json::from_str("1.5").unwrap();
        assert_eq!(fraction.to_string(), TreeKey::from("1.5").to_string());
        assert_ne!(fraction, TreeKey::from("1.5"));
    }

    #[test]
    fn test_deserialize_mixed_keys() {
        let set: KeySet = serde_json::from_str(r#"["a", 1, "a"]"#).unwrap();
        assert_eq!(set.as_slice(), &[TreeKey::from("a"), TreeKey::from(1_i64)]);
    }
}
