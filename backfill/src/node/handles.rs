//! Optional, owning and shared handles.
//!
//! Handles are transparent to registry lookups: defaults are looked up for the
//! referent's type, never for `Option<T>`, `Box<T>` or `Rc<RefCell<T>>`.

use std::any::type_name;
use std::cell::RefCell;
use std::rc::Rc;

use super::copy::copy_shared;
use super::{Mergeable, NodeKind, Relink};
use crate::{MergeError, MergeResult, Merger};

impl<T: Mergeable> Mergeable for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn fresh_copy(&self) -> Self {
        self.as_ref().map(Mergeable::fresh_copy)
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Optional
    }

    fn merge_from(&mut self, defaults: &Self) {
        if let (Some(value), Some(default)) = (self.as_mut(), defaults.as_ref()) {
            value.merge_from(default);
        }
    }

    fn walk(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        match self {
            Some(value) => merger.visit(value),
            None => Ok(()),
        }
    }

    fn relink(&mut self, relink: &mut Relink) {
        if let Some(value) = self {
            value.relink(relink);
        }
    }

    fn accept(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        if self.is_none()
            && let Some(empty) = T::empty_container()
        {
            tracing::trace!(
                node = type_name::<T>(),
                "materialised empty container for absent handle"
            );
            *self = Some(empty);
        }
        self.walk(merger)
    }
}

impl<T: Mergeable> Mergeable for Box<T> {
    fn is_zero(&self) -> bool {
        false
    }

    fn fresh_copy(&self) -> Self {
        Self::new((**self).fresh_copy())
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Reference
    }

    fn merge_from(&mut self, defaults: &Self) {
        (**self).merge_from(&**defaults);
    }

    fn walk(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        merger.visit(&mut **self)
    }

    fn relink(&mut self, relink: &mut Relink) {
        (**self).relink(relink);
    }

    fn accept(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        let identity = std::ptr::from_ref::<T>(&**self).addr();
        merger.enter_reference(identity, type_name::<T>(), |inner| self.walk(inner))
    }
}

impl<T: Mergeable> Mergeable for Rc<RefCell<T>> {
    fn is_zero(&self) -> bool {
        false
    }

    fn fresh_copy(&self) -> Self {
        copy_shared(self)
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Reference
    }

    fn merge_from(&mut self, defaults: &Self) {
        if Rc::ptr_eq(self, defaults) {
            return;
        }
        if let (Ok(mut value), Ok(default)) = (self.try_borrow_mut(), defaults.try_borrow()) {
            value.merge_from(&default);
        }
    }

    fn walk(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        let Ok(mut value) = self.try_borrow_mut() else {
            tracing::warn!(
                node = type_name::<T>(),
                "shared referent is already borrowed; treating it as a cycle"
            );
            return Err(MergeError::CircularReference {
                type_name: type_name::<T>(),
            });
        };
        merger.visit(&mut *value)
    }

    fn relink(&mut self, relink: &mut Relink) {
        if let Some(replacement) = relink.replacement_for(self) {
            *self = replacement;
            return;
        }
        if relink.enter(self)
            && let Ok(mut value) = self.try_borrow_mut()
        {
            value.relink(relink);
        }
    }

    fn accept(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        let identity = Rc::as_ptr(self).addr();
        merger.enter_reference(identity, type_name::<T>(), |inner| self.walk(inner))
    }
}
