//! Type-erased identity keys.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Object-safe view of a concrete key type.
trait Key: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq_key(&self, other: &dyn Key) -> bool;
    fn hash_key(&self, state: &mut dyn Hasher);
    fn fmt_key(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<K> Key for K
where
    K: Hash + Eq + fmt::Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_key(&self, other: &dyn Key) -> bool {
        other
            .as_any()
            .downcast_ref::<K>()
            .is_some_and(|other| other == self)
    }

    fn hash_key(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }

    fn fmt_key(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// An identity key with its concrete type erased.
///
/// Two keys are equal only when they hold the same concrete type and that
/// type's `==` says so: `IdentityKey::new(1u32)` and `IdentityKey::new(1u64)`
/// are different keys, as are `"home"` and `String::from("home")`.
/// Hashing feeds the wrapped value's own `Hash` and nothing else.
#[derive(Clone)]
pub struct IdentityKey(Arc<dyn Key>);

impl IdentityKey {
    pub fn new<K>(key: K) -> Self
    where
        K: Hash + Eq + fmt::Debug + Send + Sync + 'static,
    {
        Self(Arc::new(key))
    }

    /// Borrow the key as `K` if that is its concrete type.
    pub fn downcast_ref<K: 'static>(&self) -> Option<&K> {
        self.0.as_any().downcast_ref::<K>()
    }

    /// Whether the wrapped key is of type `K` and equal to `key`.
    pub fn matches<K>(&self, key: &K) -> bool
    where
        K: PartialEq + 'static,
    {
        self.downcast_ref::<K>().is_some_and(|own| own == key)
    }
}

impl PartialEq for IdentityKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.eq_key(&*other.0)
    }
}

impl Eq for IdentityKey {}

impl Hash for IdentityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash_key(state);
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_key(f)
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_key(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::hash::DefaultHasher;

    fn hash_of(key: &IdentityKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equal_keys_compare_and_hash_equal() {
        let a = IdentityKey::new("home");
        let b = IdentityKey::new("home");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_different_key_types_never_equal() {
        assert_ne!(IdentityKey::new(1u32), IdentityKey::new(1u64));
        assert_ne!(IdentityKey::new("home"), IdentityKey::new(String::from("home")));
    }

    #[test]
    fn test_downcast_and_matches() {
        let key = IdentityKey::new(42u32);
        assert_eq!(key.downcast_ref::<u32>(), Some(&42));
        assert_eq!(key.downcast_ref::<u64>(), None);
        assert!(key.matches(&42u32));
        assert!(!key.matches(&43u32));
        assert!(!key.matches(&42i32));
    }

    #[test]
    fn test_keys_deduplicate_in_hash_set() {
        let set: HashSet<IdentityKey> = [
            IdentityKey::new("home"),
            IdentityKey::new("home"),
            IdentityKey::new(7u8),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_debug_uses_key_representation() {
        assert_eq!(format!("{:?}", IdentityKey::new("home")), "\"home\"");
        assert_eq!(IdentityKey::new(3u8).to_string(), "3");
    }
}
