//! Frame-driven animation loop

use crate::config::Settings;
use crate::game_of_life::{load_pattern_from_file, place_centered, StepBackend, World};
use crate::overlay::{randomize_edges, stamp_time};
use crate::render::{world_size_for, Renderer};
use anyhow::{Context, Result};
use chrono::{Local, NaiveTime};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

/// What a single tick of the driver did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Counted a frame, nothing else
    IdleFrame,
    /// Advanced the world one generation and rendered it
    Stepped,
}

/// Per-step behavior of the driver
#[derive(Debug, Clone, PartialEq)]
pub struct DriverOptions {
    pub frames_per_step: u32,
    pub randomize_edges: bool,
    pub edge_density: f64,
    pub clock: bool,
}

impl From<&Settings> for DriverOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            frames_per_step: settings.simulation.frames_per_step.max(1),
            randomize_edges: settings.simulation.randomize_edges,
            edge_density: settings.simulation.edge_density,
            clock: settings.overlay.clock,
        }
    }
}

fn local_time() -> NaiveTime {
    Local::now().time()
}

/// Build the starting world for `columns x rows` visible cells, including the hidden border
pub fn initial_world(settings: &Settings, columns: usize, rows: usize, rng: &mut StdRng) -> Result<World> {
    let (width, height) = world_size_for(columns, rows);
    let simulation = &settings.simulation;

    let mut world = if simulation.populate {
        World::random(width, height, simulation.initial_density, rng)
    } else {
        World::new(width, height)
    };

    if let Some(path) = &simulation.pattern {
        let pattern = load_pattern_from_file(path)?;
        place_centered(&mut world, &pattern)
            .with_context(|| format!("Pattern {} does not fit the canvas", path.display()))?;
    }

    info!(
        "Starting {}x{} world with {} live cells",
        width,
        height,
        world.living_count()
    );
    Ok(world)
}

/// Random source for a run, reproducible when a seed is configured
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Owns the current world and advances it every `frames_per_step` ticks
pub struct Driver<B, R> {
    world: World,
    frames_since_step: u32,
    generation: u64,
    options: DriverOptions,
    backend: B,
    renderer: R,
    rng: StdRng,
    time_source: fn() -> NaiveTime,
}

impl<B: StepBackend, R: Renderer> Driver<B, R> {
    pub fn new(world: World, options: DriverOptions, backend: B, renderer: R, rng: StdRng) -> Self {
        Self {
            world,
            frames_since_step: 0,
            generation: 0,
            options,
            backend,
            renderer,
            rng,
            time_source: local_time,
        }
    }

    /// Replace the wall clock used by the clock overlay
    pub fn with_time_source(mut self, time_source: fn() -> NaiveTime) -> Self {
        self.time_source = time_source;
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Handle one animation frame
    pub fn tick(&mut self) -> Result<Phase> {
        self.frames_since_step += 1;
        if self.frames_since_step < self.options.frames_per_step {
            return Ok(Phase::IdleFrame);
        }
        self.frames_since_step = 0;

        let mut next = self.backend.step(&self.world);
        if self.options.randomize_edges {
            randomize_edges(&mut next, self.options.edge_density, &mut self.rng);
        }
        if self.options.clock {
            stamp_time(&mut next, (self.time_source)());
        }
        self.world = next;
        self.generation += 1;

        debug!(
            "generation {} via {}: {} live cells",
            self.generation,
            self.backend.name(),
            self.world.living_count()
        );

        self.renderer.render(&self.world)?;
        Ok(Phase::Stepped)
    }

    /// Tick once per `frame_time` until `max_frames` ticks ran or `wait` asks to stop
    ///
    /// `wait` receives the time left in the current frame and returns true to stop.
    /// Returns the number of ticks run.
    pub fn run<F>(&mut self, frame_time: Duration, max_frames: Option<u64>, mut wait: F) -> Result<u64>
    where
        F: FnMut(Duration) -> Result<bool>,
    {
        let mut frames = 0;

        while max_frames.is_none_or(|max| frames < max) {
            let start = Instant::now();
            self.tick()?;
            frames += 1;

            let time_left = frame_time.saturating_sub(start.elapsed());
            if wait(time_left)? {
                break;
            }
        }

        info!("Stopped after {} frames, {} generations", frames, self.generation);
        Ok(frames)
    }
}
