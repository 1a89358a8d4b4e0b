use crate::{
    clock::{Cadence, OneShot, TimeMs},
    error::{EmergraphError, EmergraphResult},
    graph::{EdgeSpec, GraphSpec, NodeSpec},
};

/// Timing knobs for one reveal cycle, all in milliseconds.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay between revealing consecutive nodes.
    pub node_interval_ms: u64,
    /// Delay between attempts to reveal the next edge.
    pub edge_interval_ms: u64,
    /// Delay after a reveal before the element's entrance progress flips to 1.
    pub entrance_delay_ms: u64,
    /// Pause after the full sequence is revealed before the cycle restarts.
    pub quiescence_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            node_interval_ms: 400,
            edge_interval_ms: 300,
            entrance_delay_ms: 50,
            quiescence_ms: 3000,
        }
    }
}

impl RevealConfig {
    pub fn validate(&self) -> EmergraphResult<()> {
        if self.node_interval_ms == 0 {
            return Err(EmergraphError::validation("node_interval_ms must be > 0"));
        }
        if self.edge_interval_ms == 0 {
            return Err(EmergraphError::validation("edge_interval_ms must be > 0"));
        }
        Ok(())
    }
}

/// A node added to the visible state.
///
/// `entrance_progress` is exactly 0 ("revealed, not yet grown") or 1 ("grown");
/// the engine records only the discrete step. `revealed_at` stamps the reveal so
/// a presentation layer can interpolate continuously between the two values.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RevealedNode {
    pub spec: NodeSpec,
    pub entrance_progress: f64,
    pub revealed_at: TimeMs,
}

/// An edge added to the visible state. Created only once both endpoint nodes
/// are revealed.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RevealedEdge {
    pub spec: EdgeSpec,
    pub entrance_progress: f64,
    pub revealed_at: TimeMs,
}

/// Current visible state of a reveal cycle.
///
/// Invariants: `next_node_cursor == revealed_nodes.len()`; edges appear in spec
/// order, each at most once per cycle, and only after both endpoints.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct EngineState {
    pub revealed_nodes: Vec<RevealedNode>,
    pub revealed_edges: Vec<RevealedEdge>,
    pub next_node_cursor: usize,
    pub next_edge_cursor: usize,
}

impl EngineState {
    pub fn is_node_revealed(&self, id: &str) -> bool {
        self.revealed_nodes.iter().any(|n| n.spec.id == id)
    }
}

/// Tick-driven engine that replays a [`GraphSpec`] as a looping reveal cycle.
///
/// The host drives it with [`GraphRevealEngine::tick`] at whatever granularity
/// its timer delivers; all sequencing is gated on the supplied timestamps, so
/// behavior is independent of call frequency. Node and edge timelines run
/// concurrently in the logical sense: each has its own cadence, and they touch
/// disjoint parts of [`EngineState`] apart from the edge timeline's read-only
/// endpoint check against revealed nodes.
pub struct GraphRevealEngine {
    graph: GraphSpec,
    config: RevealConfig,
    state: EngineState,
    node_cadence: Cadence,
    edge_cadence: Cadence,
    node_grow: OneShot,
    edge_grow: OneShot,
    restart: OneShot,
    last_now: TimeMs,
    cycles_completed: u64,
}

impl GraphRevealEngine {
    /// Build an engine over a validated graph and config.
    ///
    /// Integrity violations in the authored specs (unknown edge endpoints in
    /// particular, which would otherwise stall the cycle forever) fail loudly
    /// here instead of at runtime.
    pub fn new(graph: GraphSpec, config: RevealConfig) -> EmergraphResult<Self> {
        graph.validate()?;
        config.validate()?;
        Ok(Self {
            node_cadence: Cadence::new(config.node_interval_ms)?,
            edge_cadence: Cadence::new(config.edge_interval_ms)?,
            graph,
            config,
            state: EngineState::default(),
            node_grow: OneShot::default(),
            edge_grow: OneShot::default(),
            restart: OneShot::default(),
            last_now: TimeMs(0),
            cycles_completed: 0,
        })
    }

    pub fn graph(&self) -> &GraphSpec {
        &self.graph
    }

    pub fn config(&self) -> RevealConfig {
        self.config
    }

    /// Current visible state, for the renderer.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Number of automatic quiescence restarts so far. Manual [`reset`] calls
    /// abandon the cycle and do not count.
    ///
    /// [`reset`]: GraphRevealEngine::reset
    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    /// Advance the cycle to `now`.
    ///
    /// Level-triggered: each deadline fires at most once per tick and re-anchors
    /// from the observed `now`, so a late tick never bursts through missed
    /// periods. Grow cues run before reveals, node reveals before edge attempts
    /// (the endpoint check must observe nodes committed this tick), and the
    /// quiescence restart is armed as soon as the sequence completes.
    #[tracing::instrument(skip(self))]
    pub fn tick(&mut self, now: TimeMs) {
        self.last_now = now;

        if self.node_grow.fire(now) {
            self.grow_last_node();
        }
        if self.edge_grow.fire(now) {
            self.grow_last_edge();
        }

        if self.restart.fire(now) {
            self.cycles_completed += 1;
            self.reset();
            tracing::debug!(cycle = self.cycles_completed, "cycle restarted");
        }

        if self.state.next_node_cursor < self.graph.nodes.len()
            && self.node_cadence.fire(now)
            && self.reveal_next_node()
        {
            self.node_grow.arm(now.add_ms(self.config.entrance_delay_ms));
        }

        if self.state.next_edge_cursor < self.graph.edges.len()
            && self.edge_cadence.fire(now)
            && self.state.revealed_nodes.len() >= 2
            && self.try_reveal_next_edge()
        {
            self.edge_grow.arm(now.add_ms(self.config.entrance_delay_ms));
        }

        if self.is_complete() && !self.restart.is_armed() {
            self.restart.arm(now.add_ms(self.config.quiescence_ms));
            tracing::debug!(in_ms = self.config.quiescence_ms, "sequence complete, restart armed");
        }
    }

    /// Append the next node in sequence with entrance progress 0.
    ///
    /// Returns `false` once the node sequence is exhausted. Each index is
    /// visited exactly once per cycle, in increasing order.
    pub fn reveal_next_node(&mut self) -> bool {
        let Some(spec) = self.graph.nodes.get(self.state.next_node_cursor) else {
            return false;
        };
        self.state.revealed_nodes.push(RevealedNode {
            spec: spec.clone(),
            entrance_progress: 0.0,
            revealed_at: self.last_now,
        });
        self.state.next_node_cursor += 1;
        tracing::debug!(id = %spec.id, cursor = self.state.next_node_cursor, "node revealed");
        true
    }

    /// Flip the most recently revealed node to grown. Earlier nodes keep their
    /// progress; no-op while nothing is revealed.
    pub fn grow_last_node(&mut self) {
        if let Some(last) = self.state.revealed_nodes.last_mut() {
            last.entrance_progress = 1.0;
        }
    }

    /// Attempt to reveal the edge at the cursor.
    ///
    /// Appends and advances only when both endpoints are already revealed;
    /// otherwise state is left untouched and the same edge is retried on the
    /// next attempt (skip-and-retry, preserving spec order). Returns whether an
    /// edge was revealed.
    pub fn try_reveal_next_edge(&mut self) -> bool {
        let Some(spec) = self.graph.edges.get(self.state.next_edge_cursor) else {
            return false;
        };
        if !self.state.is_node_revealed(&spec.from) || !self.state.is_node_revealed(&spec.to) {
            tracing::debug!(from = %spec.from, to = %spec.to, "edge deferred, endpoints not yet revealed");
            return false;
        }
        self.state.revealed_edges.push(RevealedEdge {
            spec: spec.clone(),
            entrance_progress: 0.0,
            revealed_at: self.last_now,
        });
        self.state.next_edge_cursor += 1;
        tracing::debug!(from = %spec.from, to = %spec.to, cursor = self.state.next_edge_cursor, "edge revealed");
        true
    }

    /// Flip the most recently revealed edge to grown.
    pub fn grow_last_edge(&mut self) {
        if let Some(last) = self.state.revealed_edges.last_mut() {
            last.entrance_progress = 1.0;
        }
    }

    /// True once both cursors have exhausted their sequences.
    pub fn is_complete(&self) -> bool {
        self.state.next_node_cursor == self.graph.nodes.len()
            && self.state.next_edge_cursor == self.graph.edges.len()
    }

    /// Return to the fresh-construction state and cancel every pending
    /// deadline. Safe to call at any time; both timelines re-anchor at the next
    /// tick.
    pub fn reset(&mut self) {
        self.state = EngineState::default();
        self.node_cadence.cancel();
        self.edge_cadence.cancel();
        self.node_grow.cancel();
        self.edge_grow.cancel();
        self.restart.cancel();
    }
}
