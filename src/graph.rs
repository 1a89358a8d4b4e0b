use std::collections::HashSet;

use crate::error::{EmergraphError, EmergraphResult};

/// A node in the authored reveal sequence. Coordinates live in `[0, 100]`
/// percentage space; mapping to pixels is the renderer's business.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl NodeSpec {
    /// Authored position as a point.
    pub fn position(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

/// A directed edge between two authored node ids.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
}

/// The fixed, ordered node and edge sequences a reveal cycle replays.
///
/// Authored once and never mutated. Edge endpoints must reference node ids
/// present in `nodes`; `validate` enforces this up front so a malformed edge
/// fails construction instead of stalling the cycle at runtime.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
}

impl GraphSpec {
    /// Parse a graph from JSON text.
    pub fn from_json_str(s: &str) -> EmergraphResult<Self> {
        serde_json::from_str(s).map_err(|e| EmergraphError::serde(e.to_string()))
    }

    /// Fail-fast integrity check over the authored sequences.
    pub fn validate(&self) -> EmergraphResult<()> {
        let mut ids: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if node.id.trim().is_empty() {
                return Err(EmergraphError::validation("node id must be non-empty"));
            }
            if !ids.insert(node.id.as_str()) {
                return Err(EmergraphError::validation(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
            for (axis, v) in [("x", node.x), ("y", node.y)] {
                if !v.is_finite() || !(0.0..=100.0).contains(&v) {
                    return Err(EmergraphError::validation(format!(
                        "node '{}' {axis} must be within 0..=100",
                        node.id
                    )));
                }
            }
        }

        let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if edge.from == edge.to {
                return Err(EmergraphError::validation(format!(
                    "edge '{}' -> '{}' must connect two distinct nodes",
                    edge.from, edge.to
                )));
            }
            for id in [&edge.from, &edge.to] {
                if !ids.contains(id.as_str()) {
                    return Err(EmergraphError::validation(format!(
                        "edge references unknown node id '{id}'"
                    )));
                }
            }
            if !seen.insert((edge.from.as_str(), edge.to.as_str())) {
                return Err(EmergraphError::validation(format!(
                    "duplicate edge '{}' -> '{}'",
                    edge.from, edge.to
                )));
            }
        }

        Ok(())
    }

    /// The built-in knowledge-graph demo sequence (eight nodes, ten edges).
    pub fn demo() -> Self {
        fn node(id: &str, label: &str, x: f64, y: f64) -> NodeSpec {
            NodeSpec {
                id: id.to_string(),
                label: label.to_string(),
                x,
                y,
            }
        }
        fn edge(from: &str, to: &str) -> EdgeSpec {
            EdgeSpec {
                from: from.to_string(),
                to: to.to_string(),
            }
        }

        Self {
            nodes: vec![
                node("1", "Idea", 50.0, 50.0),
                node("2", "Concept", 75.0, 30.0),
                node("3", "Pattern", 25.0, 35.0),
                node("4", "Insight", 60.0, 70.0),
                node("5", "Connection", 35.0, 65.0),
                node("6", "Knowledge", 50.0, 85.0),
                node("7", "Reasoning", 80.0, 55.0),
                node("8", "Context", 20.0, 55.0),
            ],
            edges: vec![
                edge("1", "2"),
                edge("1", "3"),
                edge("2", "7"),
                edge("3", "8"),
                edge("1", "4"),
                edge("1", "5"),
                edge("4", "6"),
                edge("5", "6"),
                edge("7", "4"),
                edge("8", "5"),
            ],
        }
    }
}
