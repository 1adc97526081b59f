/// Serial bag model
use crate::shared::models::TaskId;
use std::collections::HashSet;

/// Transitive-predecessor set of one task
///
/// `hb` only ever grows. `out_buffer_count` is the number of children that
/// have not yet folded this bag into their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialBag {
    pub hb: HashSet<TaskId>,
    pub out_buffer_count: usize,
}

impl SerialBag {
    pub fn new(out_buffer_count: usize) -> Self {
        Self {
            hb: HashSet::new(),
            out_buffer_count,
        }
    }

    /// Does `task` happen before the owner of this bag?
    pub fn contains(&self, task: TaskId) -> bool {
        self.hb.contains(&task)
    }

    /// Fold a parent's predecessors and the parent itself into this bag
    pub fn absorb(&mut self, parent: TaskId, parent_bag: &SerialBag) {
        self.hb.extend(parent_bag.hb.iter().copied());
        self.hb.insert(parent);
    }

    pub fn len(&self) -> usize {
        self.hb.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hb.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_adds_parent_and_its_predecessors() {
        let mut parent = SerialBag::new(1);
        parent.hb.insert(1);

        let mut child = SerialBag::new(0);
        child.absorb(2, &parent);

        assert!(child.contains(1));
        assert!(child.contains(2));
        assert_eq!(child.len(), 2);
    }
}
