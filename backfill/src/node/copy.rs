//! Identity-preserving copies of shared handles.
//!
//! Copying an `Rc<RefCell<T>>` keeps the shape of the graph behind it. A
//! node reached twice during one copy is copied once, and a node that leads
//! back to itself is first linked to the original and then redirected to its
//! new allocation once that allocation exists.

use std::any::Any;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::Mergeable;

thread_local! {
    static COPIES: RefCell<CopyState> = RefCell::new(CopyState::default());
}

/// Book-keeping for the outermost handle copy running on this thread.
#[derive(Default)]
struct CopyState {
    open: usize,
    done: HashMap<usize, Rc<dyn Any>>,
    active: HashSet<usize>,
    revisited: HashSet<usize>,
    created: HashSet<usize>,
}

impl CopyState {
    fn finished<T: Mergeable>(&self, identity: usize) -> Option<Rc<RefCell<T>>> {
        let copy = Rc::clone(self.done.get(&identity)?);
        copy.downcast::<RefCell<T>>().ok()
    }

    /// Records a revisit of a node whose copy is still being built.
    fn revisit(&mut self, identity: usize) -> bool {
        if self.active.contains(&identity) {
            self.revisited.insert(identity);
            return true;
        }
        false
    }

    fn open(&mut self, identity: usize) {
        self.open += 1;
        self.active.insert(identity);
    }

    fn close<T: Mergeable>(&mut self, identity: usize, copy: &Rc<RefCell<T>>) -> Option<Relink> {
        self.active.remove(&identity);
        self.created.insert(Rc::as_ptr(copy).addr());
        let shared: Rc<dyn Any> = Rc::<RefCell<T>>::clone(copy);
        self.done.insert(identity, Rc::clone(&shared));
        self.revisited
            .remove(&identity)
            .then(|| Relink::new(identity, shared, self.created.clone()))
    }

    fn finish(&mut self) {
        self.open = self.open.saturating_sub(1);
        if self.open == 0 {
            *self = Self::default();
        }
    }
}

/// Copies `original` and everything reachable from it, preserving sharing
/// and cycles among the copied nodes.
///
/// A referent that is mutably borrowed is active on the current merge path
/// and is aliased rather than copied.
pub(super) fn copy_shared<T: Mergeable>(original: &Rc<RefCell<T>>) -> Rc<RefCell<T>> {
    let identity = Rc::as_ptr(original).addr();
    if let Some(copy) = COPIES.with_borrow(|state| state.finished::<T>(identity)) {
        return copy;
    }
    if COPIES.with_borrow_mut(|state| state.revisit(identity)) {
        return Rc::clone(original);
    }
    let Ok(value) = original.try_borrow() else {
        return Rc::clone(original);
    };

    COPIES.with_borrow_mut(|state| state.open(identity));
    let copy = Rc::new(RefCell::new(value.fresh_copy()));
    drop(value);
    if let Some(mut relink) = COPIES.with_borrow_mut(|state| state.close(identity, &copy))
        && let Ok(mut inner) = copy.try_borrow_mut()
    {
        tracing::trace!(
            node = std::any::type_name::<T>(),
            "relinking cyclic copy to its new allocation"
        );
        inner.relink(&mut relink);
    }
    COPIES.with_borrow_mut(CopyState::finish);
    copy
}

/// Redirects links to an original node so they point at its copy.
///
/// Produced while copying a shared handle whose referent leads back to
/// itself. [`Mergeable::relink`] implementations forward it to every child;
/// only `Rc<RefCell<_>>` handles act on it.
pub struct Relink {
    original: usize,
    replacement: Rc<dyn Any>,
    created: HashSet<usize>,
    seen: HashSet<usize>,
}

impl Relink {
    fn new(original: usize, replacement: Rc<dyn Any>, created: HashSet<usize>) -> Self {
        let seen = HashSet::from([Rc::as_ptr(&replacement).addr()]);
        Self {
            original,
            replacement,
            created,
            seen,
        }
    }

    /// Returns the copy that should replace `handle`, if `handle` points at
    /// the original being redirected.
    #[must_use]
    pub fn replacement_for<T: Mergeable>(&self, handle: &Rc<RefCell<T>>) -> Option<Rc<RefCell<T>>> {
        if Rc::as_ptr(handle).addr() != self.original {
            return None;
        }
        Rc::clone(&self.replacement).downcast::<RefCell<T>>().ok()
    }

    /// Returns `true` the first time a node created by the current copy is
    /// reached. Originals are never entered.
    pub fn enter<T: Mergeable>(&mut self, handle: &Rc<RefCell<T>>) -> bool {
        let identity = Rc::as_ptr(handle).addr();
        self.created.contains(&identity) && self.seen.insert(identity)
    }
}

impl std::fmt::Debug for Relink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relink")
            .field("original", &self.original)
            .field("created", &self.created.len())
            .finish_non_exhaustive()
    }
}
