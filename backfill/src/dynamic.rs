//! Containers whose concrete type is only known at run time.
//!
//! [`Dynamic`] plays the role of an "any" field: it holds one boxed value of
//! any [`Mergeable`] type, and the merger dispatches on that concrete type
//! when looking up defaults. The same type-erased node also backs the
//! [`crate::DefaultRegistry`] storage.

use std::any::{Any, type_name};
use std::fmt;

use crate::{MergeResult, Mergeable, Merger, NodeKind, Relink};

/// Object-safe view of a [`Mergeable`] value.
pub(crate) trait ErasedNode: Any {
    fn visit_erased(&mut self, merger: &mut Merger<'_>) -> MergeResult<()>;
    fn copy_erased(&self) -> Box<dyn ErasedNode>;
    /// Merges `defaults` when it has the same concrete type, returning
    /// whether it did.
    fn merge_erased(&mut self, defaults: &dyn ErasedNode) -> bool;
    fn kind_erased(&self) -> NodeKind;
    fn relink_erased(&mut self, relink: &mut Relink);
    fn type_name_erased(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Mergeable> ErasedNode for T {
    fn visit_erased(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        merger.visit(self)
    }

    fn copy_erased(&self) -> Box<dyn ErasedNode> {
        Box::new(self.fresh_copy())
    }

    fn merge_erased(&mut self, defaults: &dyn ErasedNode) -> bool {
        match defaults.as_any().downcast_ref::<T>() {
            Some(default) => {
                self.merge_from(default);
                true
            }
            None => false,
        }
    }

    fn kind_erased(&self) -> NodeKind {
        self.kind()
    }

    fn relink_erased(&mut self, relink: &mut Relink) {
        self.relink(relink);
    }

    fn type_name_erased(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A slot holding one value of any [`Mergeable`] type, or nothing.
///
/// An empty `Dynamic` is the zero value. When it holds a value, the merger
/// looks up defaults for the value's own concrete type.
///
/// # Examples
///
/// ```rust
/// use backfill::{DefaultRegistry, Dynamic, Mergeable, apply_defaults};
///
/// #[derive(Debug, PartialEq, Mergeable)]
/// struct Light {
///     brightness: u8,
/// }
///
/// #[derive(Mergeable)]
/// struct Room {
///     devices: Vec<Dynamic>,
/// }
///
/// let mut registry = DefaultRegistry::new();
/// registry.register(Light { brightness: 50 });
///
/// let mut room = Room { devices: vec![Dynamic::new(Light { brightness: 0 })] };
/// apply_defaults(&mut room, &registry)?;
/// assert_eq!(
///     room.devices[0].downcast_ref::<Light>(),
///     Some(&Light { brightness: 50 })
/// );
/// # Ok::<(), backfill::MergeError>(())
/// ```
#[derive(Default)]
pub struct Dynamic(Option<Box<dyn ErasedNode>>);

impl Dynamic {
    /// Wraps `value`.
    #[must_use]
    pub fn new<T: Mergeable>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    /// Creates an empty slot.
    #[must_use]
    pub const fn empty() -> Self {
        Self(None)
    }

    /// Returns `true` when the slot holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Returns `true` when the slot holds a `T`.
    #[must_use]
    pub fn is<T: Mergeable>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Borrows the held value as a `T`.
    #[must_use]
    pub fn downcast_ref<T: Mergeable>(&self) -> Option<&T> {
        self.0.as_deref()?.as_any().downcast_ref::<T>()
    }

    /// Mutably borrows the held value as a `T`.
    #[must_use]
    pub fn downcast_mut<T: Mergeable>(&mut self) -> Option<&mut T> {
        self.0.as_deref_mut()?.as_any_mut().downcast_mut::<T>()
    }

    /// Takes the held value out as a `T`, returning `self` unchanged when it
    /// holds something else.
    ///
    /// # Errors
    ///
    /// Returns the original slot when it is empty or holds another type.
    pub fn into_inner<T: Mergeable>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        self.0
            .map(|node| node.into_any().downcast::<T>())
            .and_then(Result::ok)
            .map(|boxed| *boxed)
            .ok_or_else(Self::empty)
    }

    /// Type name of the held value.
    #[must_use]
    pub fn type_name(&self) -> Option<&'static str> {
        self.0.as_deref().map(ErasedNode::type_name_erased)
    }

    /// Structural kind of the held value.
    #[must_use]
    pub fn held_kind(&self) -> Option<NodeKind> {
        self.0.as_deref().map(ErasedNode::kind_erased)
    }

    /// Replaces the slot with an empty one, returning the previous contents.
    #[must_use = "the previous contents are returned, not dropped"]
    pub fn take(&mut self) -> Self {
        Self(self.0.take())
    }
}

impl Clone for Dynamic {
    fn clone(&self) -> Self {
        self.fresh_copy()
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name() {
            Some(name) => f.debug_tuple("Dynamic").field(&name).finish(),
            None => f.write_str("Dynamic(<empty>)"),
        }
    }
}

impl Mergeable for Dynamic {
    fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    fn fresh_copy(&self) -> Self {
        Self(self.0.as_deref().map(ErasedNode::copy_erased))
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Dynamic
    }

    fn merge_from(&mut self, defaults: &Self) {
        let (Some(value), Some(default)) = (self.0.as_deref_mut(), defaults.0.as_deref()) else {
            return;
        };
        if !value.merge_erased(default) {
            tracing::trace!(
                target_type = value.type_name_erased(),
                default_type = default.type_name_erased(),
                "skipped default with a different concrete type"
            );
        }
    }

    fn walk(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        match self.0.as_deref_mut() {
            Some(value) => value.visit_erased(merger),
            None => Ok(()),
        }
    }

    fn accept(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        self.walk(merger)
    }

    fn relink(&mut self, relink: &mut Relink) {
        if let Some(value) = self.0.as_deref_mut() {
            value.relink_erased(relink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq, crate::Mergeable)]
    struct Gauge {
        level: u8,
    }

    #[rstest]
    fn empty_slot_is_zero() {
        let slot = Dynamic::empty();
        assert!(slot.is_zero());
        assert!(slot.is_empty());
        assert_eq!(slot.type_name(), None);
        assert_eq!(format!("{slot:?}"), "Dynamic(<empty>)");
    }

    #[rstest]
    fn holding_a_zero_value_is_not_zero() {
        let slot = Dynamic::new(Gauge { level: 0 });
        assert!(!slot.is_zero());
        assert!(slot.is::<Gauge>());
        assert!(!slot.is::<u8>());
        assert_eq!(slot.held_kind(), Some(NodeKind::Record));
    }

    #[rstest]
    fn fresh_copy_is_independent() {
        let original = Dynamic::new(Gauge { level: 3 });
        let mut copy = original.fresh_copy();
        if let Some(gauge) = copy.downcast_mut::<Gauge>() {
            gauge.level = 9;
        }
        assert_eq!(original.downcast_ref::<Gauge>(), Some(&Gauge { level: 3 }));
        assert_eq!(copy.downcast_ref::<Gauge>(), Some(&Gauge { level: 9 }));
    }

    #[rstest]
    fn merge_skips_mismatched_concrete_types() {
        let mut slot = Dynamic::new(Gauge { level: 0 });
        slot.merge_from(&Dynamic::new(7_u8));
        assert_eq!(slot.downcast_ref::<Gauge>(), Some(&Gauge { level: 0 }));

        slot.merge_from(&Dynamic::new(Gauge { level: 4 }));
        assert_eq!(slot.downcast_ref::<Gauge>(), Some(&Gauge { level: 4 }));
    }

    #[rstest]
    fn into_inner_returns_slot_on_mismatch() {
        let slot = Dynamic::new(Gauge { level: 2 });
        let Err(slot) = slot.into_inner::<u8>() else {
            panic!("a Gauge must not unwrap as u8");
        };
        assert_eq!(slot.into_inner::<Gauge>().ok(), Some(Gauge { level: 2 }));
    }

    #[rstest]
    fn take_leaves_an_empty_slot() {
        let mut slot = Dynamic::new(Gauge { level: 1 });
        let taken = slot.take();
        assert!(slot.is_empty());
        assert!(taken.is::<Gauge>());
    }
}
