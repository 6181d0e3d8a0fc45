//! Influence edge maintenance
//!
//! Every edge is stored on both endpoints: `source.affects` holds the target
//! and `target.depends_on` holds the source. Both sides change together.

use tracing::debug;

use super::KpiGraph;
use crate::error::{Error, Result};
use crate::models::{EdgeKind, MetricId};

impl KpiGraph {
    /// Add an edge; returns `false` if it already existed
    ///
    /// `add_edge(Affects, a, b)` and `add_edge(DependsOn, b, a)` are the same edge.
    pub fn add_edge(&mut self, kind: EdgeKind, from: &str, to: &str) -> Result<bool> {
        let (source, target) = self.resolve_edge(kind, from, to)?;

        let added = self.metric_mut(source.as_str())?.affects.insert(target.clone());
        self.metric_mut(target.as_str())?
            .depends_on
            .insert(source.clone());

        if added {
            debug!(source = %source, target = %target, "Added influence edge");
            self.bump();
        }
        Ok(added)
    }

    /// Remove an edge; returns `false` if it did not exist
    pub fn remove_edge(&mut self, kind: EdgeKind, from: &str, to: &str) -> Result<bool> {
        let (source, target) = self.resolve_edge(kind, from, to)?;

        let removed = self.metric_mut(source.as_str())?.affects.remove(&target);
        self.metric_mut(target.as_str())?.depends_on.remove(&source);

        if removed {
            debug!(source = %source, target = %target, "Removed influence edge");
            self.bump();
        }
        Ok(removed)
    }

    /// Validate endpoints and normalize to (influencer, influenced)
    fn resolve_edge(&self, kind: EdgeKind, from: &str, to: &str) -> Result<(MetricId, MetricId)> {
        if from == to {
            return Err(Error::InvalidRelation(format!(
                "metric {} cannot {} itself",
                from,
                match kind {
                    EdgeKind::DependsOn => "depend on",
                    EdgeKind::Affects => "affect",
                }
            )));
        }

        let from = self.get_metric(from)?.id.clone();
        let to = self.get_metric(to)?.id.clone();

        Ok(match kind {
            EdgeKind::Affects => (from, to),
            EdgeKind::DependsOn => (to, from),
        })
    }
}
