/// Serializable node/edge view of the task graph
use crate::features::happens_before::domain::TaskGraph;
use crate::shared::models::TaskId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: TaskId,
    /// Task name, or the id when the task never began
    pub name: String,
}

/// `source` happens before `target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: TaskId,
    pub target: TaskId,
}

/// Dependency graph in the shape visualization tools expect
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphExport {
    /// Nodes and edges ordered by task id
    pub fn from_task_graph(graph: &TaskGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|n| GraphNode {
                id: n.id,
                name: n.display_name(),
            })
            .collect();
        let edges = graph
            .edges()
            .map(|(source, target)| GraphEdge { source, target })
            .collect();
        Self { nodes, edges }
    }

    /// One line per edge (`<source> <target>`), then one line per isolated node
    pub fn to_edge_list(&self) -> String {
        let mut out = String::new();
        let mut connected = HashSet::new();
        for edge in &self.edges {
            out.push_str(&format!("{} {}\n", edge.source, edge.target));
            connected.insert(edge.source);
            connected.insert(edge.target);
        }
        for node in self.nodes.iter().filter(|n| !connected.contains(&n.id)) {
            out.push_str(&format!("{}\n", node.id));
        }
        out
    }
}
