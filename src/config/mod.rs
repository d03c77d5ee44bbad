//! Configuration management for the Game of Life canvas

pub mod settings;

pub use settings::{
    BackendKind, CliOverrides, ConfigIssue, DisplayConfig, OverlayConfig, RuntimeConfig, Settings,
    SimulationConfig,
};
