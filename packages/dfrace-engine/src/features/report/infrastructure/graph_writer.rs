//! Dependency graph dumps
//!
//! Writes the task graph for external visualization tools:
//! - edge list (`<source> <target>` per line)
//! - JSON `{ "nodes": [...], "edges": [...] }`
//! - Graphviz DOT (optional)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use petgraph::dot::{Config, Dot};
use petgraph::graph::DiGraph;
use tracing::info;

use crate::config::GraphOutputConfig;
use crate::errors::{DetectorError, Result};
use crate::features::happens_before::domain::TaskGraph;
use crate::features::report::domain::GraphExport;

pub struct GraphWriter;

impl GraphWriter {
    /// Write every enabled dump; returns the written paths
    pub fn save_all(graph: &TaskGraph, config: &GraphOutputConfig) -> Result<Vec<PathBuf>> {
        if !config.enabled {
            return Ok(Vec::new());
        }

        std::fs::create_dir_all(&config.directory)
            .map_err(|e| DetectorError::io(&config.directory, e))?;

        let export = GraphExport::from_task_graph(graph);
        let mut written = vec![
            Self::save_edge_list(&export, &config.edge_list_path())?,
            Self::save_json(&export, &config.json_path())?,
        ];
        if let Some(dot_path) = config.dot_path() {
            written.push(Self::save_dot(graph, &dot_path)?);
        }

        info!(
            "Dependency graph ({} nodes, {} edges) written to {} file(s)",
            export.nodes.len(),
            export.edges.len(),
            written.len()
        );
        Ok(written)
    }

    pub fn save_edge_list(export: &GraphExport, path: &Path) -> Result<PathBuf> {
        std::fs::write(path, export.to_edge_list()).map_err(|e| DetectorError::io(path, e))?;
        Ok(path.to_path_buf())
    }

    pub fn save_json(export: &GraphExport, path: &Path) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(export)?;
        std::fs::write(path, json).map_err(|e| DetectorError::io(path, e))?;
        Ok(path.to_path_buf())
    }

    pub fn save_dot(graph: &TaskGraph, path: &Path) -> Result<PathBuf> {
        std::fs::write(path, Self::to_dot(graph)).map_err(|e| DetectorError::io(path, e))?;
        Ok(path.to_path_buf())
    }

    /// DOT rendering with task names as node labels
    pub fn to_dot(graph: &TaskGraph) -> String {
        let mut dot_graph: DiGraph<String, &str> =
            DiGraph::with_capacity(graph.node_count(), graph.edge_count());
        let mut indices = HashMap::new();
        for node in graph.nodes() {
            indices.insert(node.id, dot_graph.add_node(node.display_name()));
        }
        for (parent, child) in graph.edges() {
            if let (Some(&from), Some(&to)) = (indices.get(&parent), indices.get(&child)) {
                dot_graph.add_edge(from, to, "");
            }
        }
        format!("{}", Dot::with_config(&dot_graph, &[Config::EdgeNoLabel]))
    }
}
