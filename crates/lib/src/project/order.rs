//! Evaluation ordering for subprojects.
//!
//! Subprojects may require another subproject to be evaluated first, either
//! explicitly through `depends_on` or implicitly through the evaluation anchor
//! that every other subproject waits on.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use super::types::{ProjectError, ProjectTree};

/// Compute the order in which subprojects are evaluated.
///
/// Dependencies come before dependents. Among projects with no ordering
/// constraint between them, declaration order is kept. The anchor only
/// applies when there are subprojects to order.
///
/// # Errors
///
/// - `UnknownEvaluationDependency` if the anchor or a `depends_on` entry names no subproject
/// - `EvaluationCycle` if the dependencies are circular
pub fn evaluation_order(tree: &ProjectTree, anchor: Option<&str>) -> Result<Vec<String>, ProjectError> {
  let mut graph: DiGraph<&str, ()> = DiGraph::new();
  let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

  // Node indices follow declaration order
  for project in &tree.subprojects {
    let idx = graph.add_node(project.name.as_str());
    nodes.insert(project.name.as_str(), idx);
  }

  if let Some(anchor) = anchor.filter(|_| !tree.subprojects.is_empty()) {
    let anchor_idx = *nodes
      .get(anchor)
      .ok_or_else(|| ProjectError::UnknownEvaluationDependency {
        project: tree.root.name.clone(),
        dependency: anchor.to_string(),
      })?;

    for project in &tree.subprojects {
      if project.name != anchor {
        graph.update_edge(anchor_idx, nodes[project.name.as_str()], ());
      }
    }
  }

  for project in &tree.subprojects {
    let dependent = nodes[project.name.as_str()];
    for dep in &project.depends_on {
      let dep_idx = *nodes
        .get(dep.as_str())
        .ok_or_else(|| ProjectError::UnknownEvaluationDependency {
          project: project.name.clone(),
          dependency: dep.clone(),
        })?;
      // Edge from dependency to dependent
      graph.update_edge(dep_idx, dependent, ());
    }
  }

  toposort(&graph, None).map_err(|cycle| ProjectError::EvaluationCycle(graph[cycle.node_id()].to_string()))?;

  // Kahn's algorithm, always taking the earliest-declared ready node
  let mut in_degree: Vec<usize> = graph
    .node_indices()
    .map(|idx| graph.neighbors_directed(idx, Direction::Incoming).count())
    .collect();
  let mut emitted = vec![false; graph.node_count()];
  let mut order = Vec::with_capacity(graph.node_count());

  while order.len() < graph.node_count() {
    let Some(next) = graph
      .node_indices()
      .find(|idx| !emitted[idx.index()] && in_degree[idx.index()] == 0)
    else {
      break;
    };

    emitted[next.index()] = true;
    for succ in graph.neighbors_directed(next, Direction::Outgoing) {
      in_degree[succ.index()] -= 1;
    }
    order.push(graph[next].to_string());
  }

  debug!(order = ?order, "computed evaluation order");
  Ok(order)
}
