//! Graph builders shared by unit and integration tests

use crate::models::{Department, EdgeKind, NewMetric};
use crate::store::KpiGraph;

/// Graph with a single department "D" named "Dept"
pub fn graph_with_department() -> KpiGraph {
    let mut graph = KpiGraph::new();
    graph
        .add_department(Department::new("D", "Dept"))
        .expect("fresh graph accepts department");
    graph
}

/// Add a metric to department "D" with both values set
pub fn add_metric(graph: &mut KpiGraph, id: &str, actual: f64, target: f64, weight: f64) {
    graph
        .add_metric(
            NewMetric::new(id, id, "D")
                .values(actual, target)
                .weight(weight),
        )
        .expect("test metric is valid");
}

/// Department "D" with metrics `ids[0] affects ids[1] affects ...`
pub fn chain_graph(ids: &[&str]) -> KpiGraph {
    let mut graph = graph_with_department();
    for id in ids {
        add_metric(&mut graph, id, 100.0, 100.0, 1.0);
    }
    for pair in ids.windows(2) {
        graph
            .add_edge(EdgeKind::Affects, pair[0], pair[1])
            .expect("chain edge is valid");
    }
    graph
}
