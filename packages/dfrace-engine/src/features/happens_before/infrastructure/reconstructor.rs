//! Happens-Before Reconstructor
//!
//! Computes, for every task, the set of all of its transitive predecessors
//! in one streaming pass over task-begin events.
//!
//! ## Algorithm (per `begin_task`)
//! 1. Root task: fresh empty bag expecting `|out_edges|` consumers.
//! 2. Fast inherit: if some parent bag has exactly one pending consumer
//!    (this task), move it out of the table and add the parent id to it.
//! 3. The bag's consumer count becomes this task's `|out_edges|`.
//! 4. Every other parent: union its set, add the parent id, decrement its
//!    consumer count and drop its bag when the count reaches zero.
//! 5. Store the bag under the task id.
//!
//! Chains cost O(1) per hop (bag reuse); joins pay for the set union.
//!
//! ## Ordering contract
//! All HB edges must be ingested before the first `begin_task`, otherwise
//! consumer counts are taken from an incomplete graph.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::features::happens_before::domain::{SerialBag, TaskGraph};
use crate::features::happens_before::ports::CausalOrder;
use crate::shared::models::TaskId;

/// Incremental serial-bag happens-before tracker
#[derive(Debug, Default)]
pub struct HappensBeforeReconstructor {
    graph: TaskGraph,
    serial_bags: HashMap<TaskId, SerialBag>,
    begun: usize,
}

impl HappensBeforeReconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dependency edge (`parent → child`); idempotent
    pub fn add_edge(&mut self, child: TaskId, parent: TaskId) {
        self.graph.add_edge(child, parent);
    }

    /// Process a task-begin event
    ///
    /// A task that already owns a bag is ignored (duplicate begin).
    pub fn begin_task(&mut self, task: TaskId, name: &str) {
        let node = self.graph.node_mut(task);
        if node.name.is_none() {
            node.name = Some(name.to_string());
        }

        if self.serial_bags.contains_key(&task) {
            debug!("Duplicate begin for task {} ignored", task);
            return;
        }

        let out_count = node.out_edges.len();
        let mut parents: Vec<TaskId> = node.in_edges.iter().copied().collect();
        self.begun += 1;

        // Step 1: root
        if parents.is_empty() {
            self.serial_bags.insert(task, SerialBag::new(out_count));
            return;
        }

        // Step 2: fast inherit from a parent whose only remaining consumer is us
        let single_consumer = parents.iter().position(|p| {
            self.serial_bags
                .get(p)
                .is_some_and(|bag| bag.out_buffer_count == 1)
        });
        let mut bag = match single_consumer {
            Some(pos) => {
                let parent = parents.remove(pos);
                let mut inherited = self.serial_bags.remove(&parent).unwrap_or_default();
                inherited.hb.insert(parent);
                trace!("Task {} inherits bag of task {}", task, parent);
                inherited
            }
            None => SerialBag::default(),
        };

        // Step 3
        bag.out_buffer_count = out_count;

        // Step 4: merge remaining parents
        for parent in parents {
            match self.serial_bags.get_mut(&parent) {
                Some(parent_bag) => {
                    bag.absorb(parent, parent_bag);
                    parent_bag.out_buffer_count = parent_bag.out_buffer_count.saturating_sub(1);
                    if parent_bag.out_buffer_count == 0 {
                        self.serial_bags.remove(&parent);
                    }
                }
                None => {
                    debug!(
                        "Task {} begins before parent {} has a serial bag",
                        task, parent
                    );
                    bag.hb.insert(parent);
                }
            }
        }

        // Step 5
        self.serial_bags.insert(task, bag);
    }

    /// Live serial bag of a task
    pub fn bag(&self, task: TaskId) -> Option<&SerialBag> {
        self.serial_bags.get(&task)
    }

    /// Does `earlier` provably happen before `later`?
    pub fn happens_before(&self, earlier: TaskId, later: TaskId) -> bool {
        self.bag(later).is_some_and(|bag| bag.contains(earlier))
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Number of live bags in the table
    pub fn live_bags(&self) -> usize {
        self.serial_bags.len()
    }

    /// Number of distinct tasks that have begun
    pub fn begun_tasks(&self) -> usize {
        self.begun
    }
}

impl CausalOrder for HappensBeforeReconstructor {
    fn is_ordered(&self, a: TaskId, b: TaskId) -> bool {
        self.happens_before(a, b) || self.happens_before(b, a)
    }

    fn task_name(&self, task: TaskId) -> String {
        self.graph
            .node(task)
            .map(|n| n.display_name())
            .unwrap_or_else(|| task.to_string())
    }
}
