// key/value extraction from associative containers
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::core::value::{Mapping, Value};

/// A key -> value container whose entries can be walked.
pub trait Associative {
    type Key;
    type Value;

    fn entries(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;
}

impl<K, V, S: BuildHasher> Associative for HashMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

impl<K, V> Associative for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

impl Associative for Mapping {
    type Key = Value;
    type Value = Value;

    fn entries(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.iter()
    }
}

/// All keys of `source`, in the container's iteration order.
pub fn map_keys<M>(source: &M) -> Vec<M::Key>
where
    M: Associative,
    M::Key: Clone,
{
    source.entries().map(|(k, _)| k.clone()).collect()
}

/// All values of `source`, in the container's iteration order.
pub fn map_values<M>(source: &M) -> Vec<M::Value>
where
    M: Associative,
    M::Value: Clone,
{
    source.entries().map(|(_, v)| v.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_of_hash_map() {
        let m = HashMap::from([("a".to_string(), 3), ("b".to_string(), 0)]);
        let mut keys = map_keys(&m);
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn values_of_hash_map() {
        let m = HashMap::from([("foo", 3), ("bar", 6)]);
        let mut values = map_values(&m);
        values.sort();
        assert_eq!(values, vec![3, 6]);
    }

    #[test]
    fn btree_map_keeps_key_order() {
        let m = BTreeMap::from([(2, "two"), (1, "one"), (3, "three")]);
        assert_eq!(map_keys(&m), vec![1, 2, 3]);
        assert_eq!(map_values(&m), vec!["one", "two", "three"]);
    }

    #[test]
    fn empty_map_gives_empty_vec() {
        let m: HashMap<String, i64> = HashMap::new();
        assert!(map_keys(&m).is_empty());
        assert!(map_values(&m).is_empty());
    }
}
