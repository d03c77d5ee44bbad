//! Per-step modifications applied to the world after the automaton runs

pub mod clock;
pub mod edges;

pub use clock::stamp_time;
pub use edges::randomize_edges;
