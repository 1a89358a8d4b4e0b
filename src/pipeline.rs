use crate::{
    clock::TimeMs,
    engine::{GraphRevealEngine, RevealConfig},
    error::{EmergraphError, EmergraphResult},
    graph::GraphSpec,
    present::{PresentOpts, VisualFrame, sample},
};

/// Virtual-clock replay options.
#[derive(Clone, Copy, Debug)]
pub struct SimulateOpts {
    /// Host tick granularity.
    pub tick_ms: u64,
    /// Total simulated time.
    pub duration_ms: u64,
    /// Snapshot cadence.
    pub sample_every_ms: u64,
    pub present: PresentOpts,
}

impl Default for SimulateOpts {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            duration_ms: 10_000,
            sample_every_ms: 100,
            present: PresentOpts::default(),
        }
    }
}

/// Replay a reveal cycle on a virtual clock and collect sampled frames.
///
/// Fully deterministic: identical inputs produce identical frames. The clock
/// starts at 0 and advances in `tick_ms` steps through `duration_ms`; a frame
/// is sampled whenever the clock passes a `sample_every_ms` boundary.
pub fn simulate(
    graph: GraphSpec,
    config: RevealConfig,
    opts: SimulateOpts,
) -> EmergraphResult<Vec<VisualFrame>> {
    if opts.tick_ms == 0 {
        return Err(EmergraphError::simulation("tick_ms must be > 0"));
    }
    if opts.sample_every_ms == 0 {
        return Err(EmergraphError::simulation("sample_every_ms must be > 0"));
    }

    let mut engine = GraphRevealEngine::new(graph, config)?;
    let mut frames = Vec::new();
    let mut next_sample = 0u64;
    let mut now = 0u64;
    while now <= opts.duration_ms {
        engine.tick(TimeMs(now));
        if now >= next_sample {
            frames.push(sample(engine.state(), TimeMs(now), &opts.present));
            next_sample = now.saturating_add(opts.sample_every_ms);
        }
        now = now.saturating_add(opts.tick_ms);
    }
    Ok(frames)
}
