//! Recursive, type-directed default merging.
//!
//! The [`Merger`] walks a value graph depth first. At every node it applies
//! the defaults registered for the node's type, newest first, and then
//! descends into the node's children. Shared references are tracked by
//! identity while they are on the active path so cyclic graphs fail fast
//! instead of recursing forever.

use std::any::type_name;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{DefaultRegistry, MergeError, MergeResult, Mergeable, NodeKind};

/// Depth limit used when no other limit is configured.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tunables for a single merge call.
///
/// # Examples
///
/// ```rust
/// use backfill::MergeOptions;
///
/// let options = MergeOptions::default().with_max_depth(32);
/// assert_eq!(options.max_depth(), 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MergeOptions {
    max_depth: usize,
}

impl MergeOptions {
    /// Sets the deepest nesting level the merger will enter.
    ///
    /// Every visited node counts, including `Option`, `Box` and `Rc`
    /// wrappers.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the configured depth limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Walker state for one merge call.
///
/// A `Merger` borrows the registry immutably for its whole lifetime, so the
/// set of defaults cannot change while a graph is being filled.
#[derive(Debug)]
pub struct Merger<'r> {
    registry: &'r DefaultRegistry,
    active: HashSet<usize>,
    depth: usize,
    options: MergeOptions,
}

impl<'r> Merger<'r> {
    /// Creates a merger with default options.
    #[must_use]
    pub fn new(registry: &'r DefaultRegistry) -> Self {
        Self::with_options(registry, MergeOptions::default())
    }

    /// Creates a merger with explicit options.
    #[must_use]
    pub fn with_options(registry: &'r DefaultRegistry, options: MergeOptions) -> Self {
        Self {
            registry,
            active: HashSet::new(),
            depth: 0,
            options,
        }
    }

    /// Visits `node`: applies its defaults and descends into its children.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::DepthExceeded`] when the depth limit is reached
    /// and propagates [`MergeError::CircularReference`] from below.
    pub fn visit<T: Mergeable>(&mut self, node: &mut T) -> MergeResult<()> {
        if self.depth >= self.options.max_depth {
            tracing::warn!(
                limit = self.options.max_depth,
                node = type_name::<T>(),
                "merge depth limit reached; aborting"
            );
            return Err(MergeError::DepthExceeded {
                limit: self.options.max_depth,
                type_name: type_name::<T>(),
            });
        }
        self.depth += 1;
        let result = node.accept(self);
        self.depth -= 1;
        result
    }

    /// Applies every default registered for `T` to `node`, newest first.
    ///
    /// Returns the number of defaults applied.
    pub fn apply_registered<T: Mergeable>(&self, node: &mut T) -> usize {
        let mut applied = 0;
        for default in self.registry.lookup::<T>().rev() {
            node.merge_from(default);
            applied += 1;
        }
        if applied > 0 {
            tracing::trace!(node = type_name::<T>(), applied, "applied registered defaults");
        }
        applied
    }

    /// Runs `operation` with the reference `identity` marked as active.
    ///
    /// The identity is released again once `operation` returns, whether it
    /// succeeded or not, so a value reachable along two separate paths is
    /// visited once per path rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::CircularReference`] when `identity` is already
    /// active, and otherwise whatever `operation` returns.
    pub fn enter_reference<F>(
        &mut self,
        identity: usize,
        type_name: &'static str,
        operation: F,
    ) -> MergeResult<()>
    where
        F: FnOnce(&mut Self) -> MergeResult<()>,
    {
        if !self.active.insert(identity) {
            tracing::warn!(node = type_name, "circular reference detected; aborting merge");
            return Err(MergeError::CircularReference { type_name });
        }
        let result = operation(self);
        self.active.remove(&identity);
        result
    }
}

/// Fills every zero value reachable from `root` using `registry`.
///
/// Mutations are applied in place and are kept even when the call fails part
/// way through.
///
/// # Errors
///
/// - [`MergeError::NotAPointer`] when `root` is a scalar.
/// - [`MergeError::NilConfig`] when `root` is an empty `Option` or
///   [`crate::Dynamic`].
/// - [`MergeError::CircularReference`] when a shared reference is reached
///   again while it is still being filled.
/// - [`MergeError::DepthExceeded`] when nesting exceeds
///   [`DEFAULT_MAX_DEPTH`].
pub fn apply_defaults<T: Mergeable>(root: &mut T, registry: &DefaultRegistry) -> MergeResult<()> {
    apply_defaults_with(root, registry, MergeOptions::default())
}

/// [`apply_defaults`] with explicit [`MergeOptions`].
///
/// # Errors
///
/// See [`apply_defaults`].
pub fn apply_defaults_with<T: Mergeable>(
    root: &mut T,
    registry: &DefaultRegistry,
    options: MergeOptions,
) -> MergeResult<()> {
    let root_type = type_name::<T>();
    match root.kind() {
        NodeKind::Scalar => {
            return Err(MergeError::NotAPointer {
                type_name: root_type,
            });
        }
        kind if kind.is_nullable() && root.is_zero() => {
            return Err(MergeError::NilConfig {
                type_name: root_type,
            });
        }
        _ => {}
    }
    tracing::debug!(
        root = root_type,
        registered = registry.len(),
        max_depth = options.max_depth(),
        "applying defaults"
    );
    Merger::with_options(registry, options).visit(root)
}
