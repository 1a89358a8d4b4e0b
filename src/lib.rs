//! Emergraph replays a fixed node/edge sequence as a looping, timed reveal
//! animation. The engine owns the sequencing state machine; painting is left to
//! an external renderer that reads the sampled visual state each tick.
#![forbid(unsafe_code)]

pub mod clock;
pub mod ease;
pub mod engine;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod present;

pub use clock::{Cadence, OneShot, TimeMs};
pub use ease::Ease;
pub use engine::{EngineState, GraphRevealEngine, RevealConfig, RevealedEdge, RevealedNode};
pub use error::{EmergraphError, EmergraphResult};
pub use graph::{EdgeSpec, GraphSpec, NodeSpec};
pub use pipeline::{SimulateOpts, simulate};
pub use present::{PresentOpts, VisualEdge, VisualFrame, VisualNode, sample};
