use kurbo::Point;

use crate::{clock::TimeMs, ease::Ease, engine::EngineState};

/// Renderer-facing sampling options.
///
/// The engine only records the discrete revealed/grown step; these options
/// control how that step is stretched into a continuous entrance for painting.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PresentOpts {
    pub node_entrance_ms: u64,
    pub edge_entrance_ms: u64,
    pub node_ease: Ease,
    pub edge_ease: Ease,
}

impl Default for PresentOpts {
    fn default() -> Self {
        Self {
            node_entrance_ms: 500,
            edge_entrance_ms: 600,
            node_ease: Ease::OutBack,
            edge_ease: Ease::OutCubic,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct VisualNode {
    pub id: String,
    pub label: String,
    pub pos: Point,
    pub progress: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct VisualEdge {
    pub from: String,
    pub to: String,
    pub a: Point,
    pub b: Point,
    pub progress: f64,
}

/// One sampled snapshot of the visible graph.
#[derive(Clone, Debug, serde::Serialize)]
pub struct VisualFrame {
    pub at: TimeMs,
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
}

/// Sample the engine state into a paintable frame.
///
/// A pure read: progress stays 0 until the engine's grow step, then eases from
/// the reveal timestamp over the configured entrance duration. Edge endpoint
/// positions come from the revealed nodes, which the engine guarantees are
/// present before the edge exists.
pub fn sample(state: &EngineState, now: TimeMs, opts: &PresentOpts) -> VisualFrame {
    let nodes = state
        .revealed_nodes
        .iter()
        .map(|n| VisualNode {
            id: n.spec.id.clone(),
            label: n.spec.label.clone(),
            pos: n.spec.position(),
            progress: entrance(
                n.entrance_progress,
                n.revealed_at,
                now,
                opts.node_entrance_ms,
                opts.node_ease,
            ),
        })
        .collect();

    let edges = state
        .revealed_edges
        .iter()
        .filter_map(|e| {
            let a = position_of(state, &e.spec.from)?;
            let b = position_of(state, &e.spec.to)?;
            Some(VisualEdge {
                from: e.spec.from.clone(),
                to: e.spec.to.clone(),
                a,
                b,
                progress: entrance(
                    e.entrance_progress,
                    e.revealed_at,
                    now,
                    opts.edge_entrance_ms,
                    opts.edge_ease,
                ),
            })
        })
        .collect();

    VisualFrame {
        at: now,
        nodes,
        edges,
    }
}

fn position_of(state: &EngineState, id: &str) -> Option<Point> {
    state
        .revealed_nodes
        .iter()
        .find(|n| n.spec.id == id)
        .map(|n| n.spec.position())
}

fn entrance(discrete: f64, revealed_at: TimeMs, now: TimeMs, duration_ms: u64, ease: Ease) -> f64 {
    if discrete <= 0.0 {
        return 0.0;
    }
    if duration_ms == 0 {
        return 1.0;
    }
    let t = now.since(revealed_at) as f64 / duration_ms as f64;
    ease.apply(t)
}
