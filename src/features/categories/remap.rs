//! Old-id to new-id remapping for category imports.
//!
//! Imported categories get fresh ids from storage, so every `parent_id` in a
//! payload has to be translated before the child can be created. Roots are
//! created first; children then come out of a [`ChildQueue`] only once their
//! parent has been created, so trees of any depth stay intact. A child whose
//! parent never shows up is demoted to a root instead of being dropped.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::features::categories::dtos::CategoryTransferDto;

/// Mapping table built while one import runs
#[derive(Debug, Default)]
pub struct IdRemapper {
    mapping: HashMap<i32, i32>,
}

impl IdRemapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember that payload id `old_id` was stored as `new_id`.
    /// A repeated `old_id` points at the most recent record.
    pub fn record(&mut self, old_id: i32, new_id: i32) {
        self.mapping.insert(old_id, new_id);
    }

    /// New id of `parent_old_id`, or `None` when it is absent or not yet mapped
    pub fn resolve(&self, parent_old_id: Option<i32>) -> Option<i32> {
        parent_old_id.and_then(|old_id| self.mapping.get(&old_id).copied())
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

/// Where the next child goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Parent resolved to this new id
    Under(i32),
    /// Parent could not be resolved; create as a root
    Demoted { missing_parent_id: i32 },
}

/// Split a payload into roots (payload order) and children.
pub fn split_roots(
    records: Vec<CategoryTransferDto>,
) -> (Vec<CategoryTransferDto>, Vec<CategoryTransferDto>) {
    records.into_iter().partition(|r| r.parent_id.is_none())
}

/// Children waiting for their parent to be created.
///
/// Records are bucketed by old `parent_id` and each bucket is sorted by old
/// `id`. Buckets whose parent is already mapped sit in a ready set, and
/// [`ChildQueue::next`] drains the lowest ready bucket first. A bucket turns
/// ready when the caller maps the id of the record it was last handed.
///
/// When nothing is ready, one record is demoted. A bucket whose parent id
/// does not belong to any waiting record is preferred, so a missing subtree
/// root is demoted and its descendants still attach to it. Only a cycle
/// leaves no such bucket, and then the lowest waiting bucket breaks it.
#[derive(Debug)]
pub struct ChildQueue {
    waiting: BTreeMap<Option<i32>, VecDeque<CategoryTransferDto>>,
    ready: BTreeSet<Option<i32>>,
    orphans: BTreeSet<Option<i32>>,
    last_handed_out: Option<i32>,
    len: usize,
}

impl ChildQueue {
    pub fn new(mut children: Vec<CategoryTransferDto>, remapper: &IdRemapper) -> Self {
        children.sort_by_key(|r| (r.parent_id, r.id));
        let len = children.len();
        let ids: HashSet<i32> = children.iter().map(|r| r.id).collect();

        let mut waiting: BTreeMap<Option<i32>, VecDeque<CategoryTransferDto>> = BTreeMap::new();
        for record in children {
            waiting.entry(record.parent_id).or_default().push_back(record);
        }

        let mut ready = BTreeSet::new();
        let mut orphans = BTreeSet::new();
        for &parent_id in waiting.keys() {
            if remapper.resolve(parent_id).is_some() {
                ready.insert(parent_id);
            } else if parent_id.is_some_and(|p| !ids.contains(&p)) {
                orphans.insert(parent_id);
            }
        }

        Self {
            waiting,
            ready,
            orphans,
            last_handed_out: None,
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self, remapper: &IdRemapper) -> Option<(CategoryTransferDto, Placement)> {
        if let Some(old_id) = self.last_handed_out.take() {
            let parent_id = Some(old_id);
            if remapper.resolve(parent_id).is_some() && self.waiting.contains_key(&parent_id) {
                self.orphans.remove(&parent_id);
                self.ready.insert(parent_id);
            }
        }

        let ready = self
            .ready
            .first()
            .copied()
            .and_then(|parent_id| Some((parent_id, remapper.resolve(parent_id)?)));
        if let Some((parent_id, new_parent_id)) = ready {
            let record = self.pop(parent_id)?;
            return Some((record, Placement::Under(new_parent_id)));
        }

        let parent_id = self
            .orphans
            .first()
            .copied()
            .or_else(|| self.waiting.keys().next().copied())?;
        let record = self.pop(parent_id)?;
        let missing_parent_id = record.parent_id.unwrap_or_default();
        Some((record, Placement::Demoted { missing_parent_id }))
    }

    fn pop(&mut self, parent_id: Option<i32>) -> Option<CategoryTransferDto> {
        let bucket = self.waiting.get_mut(&parent_id)?;
        let record = bucket.pop_front()?;
        if bucket.is_empty() {
            self.waiting.remove(&parent_id);
            self.ready.remove(&parent_id);
            self.orphans.remove(&parent_id);
        }
        self.len -= 1;
        self.last_handed_out = Some(record.id);
        Some(record)
    }
}
