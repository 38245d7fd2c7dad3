//! Type-keyed store of default instances.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

use crate::Mergeable;
use crate::dynamic::ErasedNode;

/// Ordered defaults grouped by the runtime type they apply to.
///
/// Registration order encodes priority: the merger applies the most
/// recently registered default first, and because each application only
/// writes fields that are still zero, the newest registration wins.
///
/// # Examples
///
/// ```rust
/// use backfill::{DefaultRegistry, Mergeable};
///
/// #[derive(Debug, PartialEq, Mergeable)]
/// struct Retry {
///     attempts: u32,
/// }
///
/// let registry = DefaultRegistry::new()
///     .with(Retry { attempts: 3 })
///     .with(Retry { attempts: 5 });
///
/// let attempts: Vec<u32> = registry.lookup::<Retry>().map(|r| r.attempts).collect();
/// assert_eq!(attempts, vec![3, 5]);
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Default)]
pub struct DefaultRegistry {
    entries: HashMap<TypeId, Vec<Box<dyn ErasedNode>>>,
    len: usize,
}

impl DefaultRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the defaults registered for `T`.
    pub fn register<T: Mergeable>(&mut self, value: T) {
        tracing::trace!(default_type = type_name::<T>(), "registered default");
        self.entries
            .entry(TypeId::of::<T>())
            .or_default()
            .push(Box::new(value));
        self.len += 1;
    }

    /// Builder form of [`DefaultRegistry::register`].
    #[must_use]
    pub fn with<T: Mergeable>(mut self, value: T) -> Self {
        self.register(value);
        self
    }

    /// Defaults registered for `T`, oldest first.
    ///
    /// Returns an empty iterator when nothing is registered for `T`.
    pub fn lookup<T: Mergeable>(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.entries
            .get(&TypeId::of::<T>())
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| entry.as_any().downcast_ref::<T>())
    }

    /// Number of defaults registered for `T`.
    #[must_use]
    pub fn count_for<T: Mergeable>(&self) -> usize {
        self.entries.get(&TypeId::of::<T>()).map_or(0, Vec::len)
    }

    /// Total number of registered defaults across all types.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when nothing has been registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends every default from `other`, keeping its relative order after
    /// the defaults already held here.
    pub fn extend(&mut self, other: Self) {
        for (type_id, values) in other.entries {
            self.len += values.len();
            self.entries.entry(type_id).or_default().extend(values);
        }
    }
}

impl Clone for DefaultRegistry {
    fn clone(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(type_id, values)| {
                let copies = values.iter().map(|value| value.copy_erased()).collect();
                (*type_id, copies)
            })
            .collect();
        Self {
            entries,
            len: self.len,
        }
    }
}

impl fmt::Debug for DefaultRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for values in self.entries.values() {
            if let Some(first) = values.first() {
                map.entry(&first.type_name_erased(), &values.len());
            }
        }
        map.finish()
    }
}
