//! Game of Life core functionality

pub mod backend;
pub mod io;
pub mod rules;
pub mod world;

pub use backend::{create_backend, CpuBackend, ParallelBackend, StepBackend};
pub use io::{load_pattern_from_file, place_centered, save_world_to_file};
pub use world::World;
