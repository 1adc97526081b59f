/// Task dependency graph
use crate::shared::models::TaskId;
use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A task as seen by the HB log and the trace log
///
/// Created on first mention, never deleted. `name` is filled in when the
/// task's begin event is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNode {
    pub id: TaskId,
    pub name: Option<String>,
    /// Parents (tasks this one depends on)
    pub in_edges: BTreeSet<TaskId>,
    /// Children (tasks depending on this one)
    pub out_edges: BTreeSet<TaskId>,
}

impl TaskNode {
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Display name, falling back to the numeric id
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.in_edges.is_empty()
    }
}

/// DAG of task-creation dependencies, ordered by task id
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    nodes: BTreeMap<TaskId, TaskNode>,
    edge_count: usize,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `parent → child` (idempotent)
    pub fn add_edge(&mut self, child: TaskId, parent: TaskId) {
        let inserted = self.node_mut(child).in_edges.insert(parent);
        self.node_mut(parent).out_edges.insert(child);
        if inserted {
            self.edge_count += 1;
        }
    }

    /// Get or create a node
    pub fn node_mut(&mut self, id: TaskId) -> &mut TaskNode {
        self.nodes.entry(id).or_insert_with(|| TaskNode::new(id))
    }

    pub fn node(&self, id: TaskId) -> Option<&TaskNode> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TaskNode> {
        self.nodes.values()
    }

    /// All edges as `(parent, child)`, ordered
    pub fn edges(&self) -> impl Iterator<Item = (TaskId, TaskId)> + '_ {
        self.nodes
            .values()
            .flat_map(|n| n.out_edges.iter().map(move |&child| (n.id, child)))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Build a petgraph view (`parent → child`)
    pub fn to_graphmap(&self) -> DiGraphMap<TaskId, ()> {
        let mut graph = DiGraphMap::with_capacity(self.nodes.len(), self.edge_count);
        for id in self.nodes.keys() {
            graph.add_node(*id);
        }
        for (parent, child) in self.edges() {
            graph.add_edge(parent, child, ());
        }
        graph
    }

    /// Serial bag inheritance assumes a DAG
    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.to_graphmap())
    }
}
