//! Dependency (influence) graph queries
//!
//! Edges express that one metric's behavior influences another's. The graph
//! never orders evaluation; it answers "what influences this metric" and
//! "what does this metric influence" questions. Cycles are legal, and every
//! traversal here is visited-set based and iterative, so it terminates on
//! cyclic input and returns whatever it reached.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{EdgeKind, Metric, MetricId};
use crate::store::KpiGraph;

/// A metric reached by a traversal, with its hop distance from the start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reached {
    pub id: MetricId,
    pub depth: usize,
}

/// Read-only view over the influence edges of a graph
pub struct DependencyGraph<'a> {
    graph: &'a KpiGraph,
}

impl KpiGraph {
    /// Influence-edge view of this graph
    pub fn dependencies(&self) -> DependencyGraph<'_> {
        DependencyGraph { graph: self }
    }
}

impl<'a> DependencyGraph<'a> {
    /// Direct neighbors of a metric in the given direction
    pub fn neighbors(&self, id: &str, direction: EdgeKind) -> Result<BTreeSet<MetricId>> {
        let metric = self.graph.get_metric(id)?;
        Ok(edges_of(metric, direction).clone())
    }

    /// Whether any directed cycle exists (informational)
    pub fn has_cycle(&self) -> bool {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            InProgress,
            Done,
        }

        let mut marks: HashMap<&MetricId, Mark> = HashMap::new();

        for start in self.graph.get_all_metrics() {
            if marks.contains_key(&start.id) {
                continue;
            }

            // Explicit stack of (node, remaining children) instead of recursion
            let mut stack: Vec<(&MetricId, Vec<&MetricId>)> =
                vec![(&start.id, start.affects.iter().collect())];
            marks.insert(&start.id, Mark::InProgress);

            while let Some((node, children)) = stack.last_mut() {
                match children.pop() {
                    Some(child) => match marks.get(child) {
                        Some(Mark::InProgress) => return true,
                        Some(Mark::Done) => {}
                        None => {
                            let next: Vec<&MetricId> = match self.graph.get_metric(child.as_str()) {
                                Ok(m) => m.affects.iter().collect(),
                                Err(_) => vec![],
                            };
                            marks.insert(child, Mark::InProgress);
                            stack.push((child, next));
                        }
                    },
                    None => {
                        marks.insert(*node, Mark::Done);
                        stack.pop();
                    }
                }
            }
        }

        false
    }

    /// Every metric transitively reachable from `id`, breadth first
    ///
    /// The start metric itself is not included, even when a cycle leads back to it.
    pub fn reachable(&self, id: &str, direction: EdgeKind) -> Result<Vec<Reached>> {
        let start = self.graph.get_metric(id)?;

        let mut visited: HashSet<&MetricId> = HashSet::new();
        visited.insert(&start.id);

        let mut queue: VecDeque<(&Metric, usize)> = VecDeque::new();
        queue.push_back((start, 0));

        let mut reached = vec![];
        while let Some((metric, depth)) = queue.pop_front() {
            for next_id in edges_of(metric, direction) {
                if !visited.insert(next_id) {
                    continue;
                }
                reached.push(Reached {
                    id: next_id.clone(),
                    depth: depth + 1,
                });
                if let Ok(next) = self.graph.get_metric(next_id.as_str()) {
                    queue.push_back((next, depth + 1));
                }
            }
        }

        Ok(reached)
    }
}

fn edges_of(metric: &Metric, direction: EdgeKind) -> &BTreeSet<MetricId> {
    match direction {
        EdgeKind::DependsOn => &metric.depends_on,
        EdgeKind::Affects => &metric.affects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::chain_graph;

    #[test]
    fn test_neighbors_both_directions() {
        let graph = chain_graph(&["A", "B", "C"]);
        let deps = graph.dependencies();

        let down = deps.neighbors("A", EdgeKind::Affects).unwrap();
        assert_eq!(down.into_iter().collect::<Vec<_>>(), vec![MetricId::new("B")]);

        let up = deps.neighbors("B", EdgeKind::DependsOn).unwrap();
        assert_eq!(up.into_iter().collect::<Vec<_>>(), vec![MetricId::new("A")]);
    }

    #[test]
    fn test_neighbors_unknown_metric() {
        let graph = chain_graph(&["A"]);
        let err = graph.dependencies().neighbors("Z", EdgeKind::Affects);
        assert!(err.unwrap_err().is_not_found());
    }

    #[test]
    fn test_acyclic_chain_has_no_cycle() {
        let graph = chain_graph(&["A", "B", "C", "D"]);
        assert!(!graph.dependencies().has_cycle());
    }

    #[test]
    fn test_cycle_detected_and_traversal_terminates() {
        let mut graph = chain_graph(&["A", "B", "C"]);
        graph.add_edge(EdgeKind::Affects, "C", "A").unwrap();

        let deps = graph.dependencies();
        assert!(deps.has_cycle());

        let reached = deps.reachable("A", EdgeKind::Affects).unwrap();
        let ids: Vec<_> = reached.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);
        assert_eq!(reached[1].depth, 2);
    }

    #[test]
    fn test_reachable_upstream() {
        let graph = chain_graph(&["A", "B", "C"]);
        let reached = graph
            .dependencies()
            .reachable("C", EdgeKind::DependsOn)
            .unwrap();
        let ids: Vec<_> = reached.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_diamond_visits_each_metric_once() {
        let mut graph = chain_graph(&["A", "B", "D"]);
        crate::test_utils::add_metric(&mut graph, "C", 1.0, 1.0, 1.0);
        graph.add_edge(EdgeKind::Affects, "A", "C").unwrap();
        graph.add_edge(EdgeKind::Affects, "C", "D").unwrap();

        let reached = graph.dependencies().reachable("A", EdgeKind::Affects).unwrap();
        assert_eq!(reached.len(), 3);
        assert!(!graph.dependencies().has_cycle());
    }
}
