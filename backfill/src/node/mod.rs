//! The [`Mergeable`] trait and its built-in implementations.
//!
//! A `Mergeable` type knows four things about itself: whether it is zero,
//! how to produce an independent copy, how to absorb a default of its own
//! type, and which children the [`Merger`] should descend into. The derive
//! macro generates all four for structs and enums; this module supplies them
//! for scalars, standard containers and pointer types.

use std::any::Any;

use crate::{MergeResult, Merger};

mod collections;
mod copy;
mod handles;
mod scalar;

pub use copy::Relink;


/// Structural classification of a value node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Struct or enum with exposed fields.
    Record,
    /// Ordered collection such as `Vec<T>`.
    Sequence,
    /// Keyed collection such as `HashMap<K, V>`.
    Map,
    /// Nullable handle, i.e. `Option<T>`.
    Optional,
    /// Owning or shared pointer such as `Box<T>` or `Rc<RefCell<T>>`.
    Reference,
    /// Container holding a value of a type known only at run time.
    Dynamic,
    /// Terminal value with no children.
    Scalar,
}

impl NodeKind {
    /// Returns `true` for kinds whose emptiness means "absent".
    #[must_use]
    pub const fn is_nullable(self) -> bool {
        matches!(self, Self::Optional | Self::Dynamic)
    }
}

/// A value the merge engine can inspect and fill.
///
/// Implementations are normally produced by `#[derive(Mergeable)]`. Manual
/// implementations for opaque leaf types only need [`Mergeable::is_zero`] and
/// [`Mergeable::fresh_copy`]; the remaining methods default to scalar
/// behaviour.
///
/// # Examples
///
/// ```rust
/// use backfill::{Mergeable, NodeKind};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Port(u16);
///
/// impl Mergeable for Port {
///     fn is_zero(&self) -> bool {
///         self.0 == 0
///     }
///
///     fn fresh_copy(&self) -> Self {
///         self.clone()
///     }
/// }
///
/// assert!(Port(0).is_zero());
/// assert_eq!(Port(8080).kind(), NodeKind::Scalar);
/// ```
pub trait Mergeable: Any {
    /// Returns `true` when the value equals the zero value for its type.
    fn is_zero(&self) -> bool;

    /// Produces an independently owned copy.
    ///
    /// Shared handles must be re-allocated rather than aliased so a value
    /// copied out of the registry never shares state with it.
    #[must_use]
    fn fresh_copy(&self) -> Self
    where
        Self: Sized;

    /// Structural classification used for root checks and diagnostics.
    fn kind(&self) -> NodeKind {
        NodeKind::Scalar
    }

    /// Absorbs `defaults` into a value that is not itself zero.
    ///
    /// Records fill each zero field from the matching default field and merge
    /// deeper into non-zero ones; maps copy absent keys. Scalars and
    /// sequences do nothing.
    fn merge_from(&mut self, defaults: &Self)
    where
        Self: Sized,
    {
        let _ = defaults;
    }

    /// Visits structural children through `merger`.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::MergeError`] raised while visiting a child.
    fn walk(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        let _ = merger;
        Ok(())
    }

    /// Handles this node on behalf of [`Merger::visit`].
    ///
    /// The default applies registered defaults for `Self` and then walks the
    /// children. Wrappers override this to stay transparent to lookups; maps
    /// override it to walk their entries before adding default keys.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::MergeError`] raised below this node.
    fn accept(&mut self, merger: &mut Merger<'_>) -> MergeResult<()>
    where
        Self: Sized,
    {
        merger.apply_registered(self);
        self.walk(merger)
    }

    /// Forwards `relink` to every shared handle reachable from this value.
    ///
    /// Runs on freshly copied values only, after a copied `Rc` turned out to
    /// lead back to itself. Leaf types keep the default, which does nothing.
    fn relink(&mut self, relink: &mut Relink) {
        let _ = relink;
    }

    /// Empty container used to materialise a `None` handle, if any.
    ///
    /// Maps return an empty map so a `None` map field becomes `Some({})`.
    #[must_use]
    fn empty_container() -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}

/// Field-level merge of a single field.
///
/// A zero `dst` is replaced with a fresh copy of `src`; otherwise `src` is
/// merged into `dst` so nested zero leaves still receive defaults. Records
/// and fixed arrays are always merged element by element, even when zero,
/// so fields marked `#[backfill(skip)]` keep the caller's values.
///
/// # Examples
///
/// ```rust
/// use backfill::merge_field;
///
/// let mut timeout = 0_u64;
/// merge_field(&mut timeout, &30);
/// assert_eq!(timeout, 30);
///
/// let mut name = String::from("edge");
/// merge_field(&mut name, &String::from("fallback"));
/// assert_eq!(name, "edge");
/// ```
pub fn merge_field<T: Mergeable>(dst: &mut T, src: &T) {
    let piecewise = matches!(dst.kind(), NodeKind::Record | NodeKind::Sequence);
    if dst.is_zero() && !piecewise {
        *dst = src.fresh_copy();
    } else {
        dst.merge_from(src);
    }
}
