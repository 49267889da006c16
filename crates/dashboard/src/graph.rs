//! Dependency graph of the dashboard panels.
//!
//! Each node declares the inputs it reads and the nodes it is computed
//! from. An update recomputes only the nodes whose inputs changed, plus
//! everything downstream of them.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A user-controlled input of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum InputKind {
    Filter,
    Metric,
    TopN,
}

impl InputKind {
    pub const ALL: [InputKind; 3] = [InputKind::Filter, InputKind::Metric, InputKind::TopN];
}

/// A computed value of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Node {
    FilteredView,
    Kpis,
    Distribution,
    Trend,
    Ranking,
    Geo,
}

impl Node {
    /// Every node, dependencies before dependents
    pub const ALL: [Node; 6] = [
        Node::FilteredView,
        Node::Kpis,
        Node::Distribution,
        Node::Trend,
        Node::Ranking,
        Node::Geo,
    ];

    /// Inputs this node reads directly
    pub fn inputs(&self) -> &'static [InputKind] {
        match self {
            Node::FilteredView => &[InputKind::Filter],
            Node::Trend => &[InputKind::Metric],
            Node::Ranking => &[InputKind::TopN],
            Node::Kpis | Node::Distribution | Node::Geo => &[],
        }
    }

    /// Nodes this node is computed from
    pub fn dependencies(&self) -> &'static [Node] {
        match self {
            Node::FilteredView | Node::Geo => &[],
            Node::Kpis | Node::Distribution | Node::Trend | Node::Ranking => &[Node::FilteredView],
        }
    }

    /// Panels shown to the user; the view is internal
    pub fn is_panel(&self) -> bool {
        !matches!(self, Node::FilteredView)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Node::FilteredView => "filtered view",
            Node::Kpis => "kpis",
            Node::Distribution => "distribution",
            Node::Trend => "trend",
            Node::Ranking => "ranking",
            Node::Geo => "geo",
        };
        f.write_str(name)
    }
}

/// Nodes to recompute after `changed` inputs, in topological order.
pub fn dirty_nodes(changed: &BTreeSet<InputKind>) -> Vec<Node> {
    let mut dirty: Vec<Node> = Vec::new();
    for node in Node::ALL {
        let input_changed = node.inputs().iter().any(|input| changed.contains(input));
        let upstream_dirty = node.dependencies().iter().any(|dep| dirty.contains(dep));
        if input_changed || upstream_dirty {
            dirty.push(node);
        }
    }
    dirty
}
