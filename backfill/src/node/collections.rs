//! Sequences, fixed arrays and keyed maps.
//!
//! Present containers are never zero, even when empty: an empty list supplied
//! by the caller is a value and must survive the merge. Wrap a container in
//! `Option` to make it absent.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

use super::{Mergeable, NodeKind, Relink, merge_field};
use crate::{MergeResult, Merger};

impl<T: Mergeable> Mergeable for Vec<T> {
    fn is_zero(&self) -> bool {
        false
    }

    fn fresh_copy(&self) -> Self {
        self.iter().map(Mergeable::fresh_copy).collect()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    fn walk(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        self.iter_mut().try_for_each(|item| merger.visit(item))
    }

    fn relink(&mut self, relink: &mut Relink) {
        self.iter_mut().for_each(|item| item.relink(relink));
    }
}

impl<T: Mergeable> Mergeable for VecDeque<T> {
    fn is_zero(&self) -> bool {
        false
    }

    fn fresh_copy(&self) -> Self {
        self.iter().map(Mergeable::fresh_copy).collect()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    fn walk(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        self.iter_mut().try_for_each(|item| merger.visit(item))
    }

    fn relink(&mut self, relink: &mut Relink) {
        self.iter_mut().for_each(|item| item.relink(relink));
    }
}

impl<T: Mergeable, const N: usize> Mergeable for [T; N] {
    fn is_zero(&self) -> bool {
        self.iter().all(Mergeable::is_zero)
    }

    fn fresh_copy(&self) -> Self {
        self.each_ref().map(Mergeable::fresh_copy)
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    fn merge_from(&mut self, defaults: &Self) {
        if self.is_zero() {
            for (item, default) in self.iter_mut().zip(defaults) {
                merge_field(item, default);
            }
        }
    }

    fn walk(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        self.iter_mut().try_for_each(|item| merger.visit(item))
    }

    fn relink(&mut self, relink: &mut Relink) {
        self.iter_mut().for_each(|item| item.relink(relink));
    }
}

impl<K, V, S> Mergeable for HashMap<K, V, S>
where
    K: Eq + Hash + Clone + 'static,
    V: Mergeable,
    S: BuildHasher + Default + 'static,
{
    fn is_zero(&self) -> bool {
        false
    }

    fn fresh_copy(&self) -> Self {
        self.iter()
            .map(|(key, value)| (key.clone(), value.fresh_copy()))
            .collect()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Map
    }

    fn merge_from(&mut self, defaults: &Self) {
        for (key, value) in defaults {
            if !self.contains_key(key) {
                self.insert(key.clone(), value.fresh_copy());
            }
        }
    }

    fn walk(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        self.values_mut().try_for_each(|value| merger.visit(value))
    }

    fn relink(&mut self, relink: &mut Relink) {
        self.values_mut().for_each(|value| value.relink(relink));
    }

    fn accept(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        self.walk(merger)?;
        merger.apply_registered(self);
        Ok(())
    }

    fn empty_container() -> Option<Self> {
        Some(Self::default())
    }
}

impl<K, V> Mergeable for BTreeMap<K, V>
where
    K: Ord + Clone + 'static,
    V: Mergeable,
{
    fn is_zero(&self) -> bool {
        false
    }

    fn fresh_copy(&self) -> Self {
        self.iter()
            .map(|(key, value)| (key.clone(), value.fresh_copy()))
            .collect()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Map
    }

    fn merge_from(&mut self, defaults: &Self) {
        for (key, value) in defaults {
            self.entry(key.clone())
                .or_insert_with(|| value.fresh_copy());
        }
    }

    fn walk(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        self.values_mut().try_for_each(|value| merger.visit(value))
    }

    fn relink(&mut self, relink: &mut Relink) {
        self.values_mut().for_each(|value| value.relink(relink));
    }

    fn accept(&mut self, merger: &mut Merger<'_>) -> MergeResult<()> {
        self.walk(merger)?;
        merger.apply_registered(self);
        Ok(())
    }

    fn empty_container() -> Option<Self> {
        Some(Self::default())
    }
}
