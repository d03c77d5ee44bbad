//! Conway's Game of Life canvas
//!
//! A fixed-size world stepped under B3/S23 with hard edges, drawn to a raster
//! or a terminal by a frame-driven loop with optional edge noise and a clock.

pub mod config;
pub mod driver;
pub mod game_of_life;
pub mod overlay;
pub mod render;
pub mod utils;

pub use config::Settings;
pub use driver::{Driver, DriverOptions, Phase};
pub use game_of_life::World;

use anyhow::Result;
use render::Renderer;

/// Seed a world from the settings and run `frames` ticks headless, returning the final raster
pub fn render_snapshot(settings: &Settings, columns: usize, rows: usize, frames: u64) -> Result<render::Raster> {
    let mut rng = driver::create_rng(settings.simulation.seed);
    let world = driver::initial_world(settings, columns, rows, &mut rng)?;

    let mut renderer = render::RasterRenderer::new(
        columns,
        rows,
        settings.display.cell_size,
        settings.display.margin,
    );
    renderer.render(&world)?;

    let backend = game_of_life::create_backend(settings.simulation.backend);
    let mut driver = Driver::new(world, DriverOptions::from(settings), backend, renderer, rng);
    for _ in 0..frames {
        driver.tick()?;
    }

    Ok(driver.into_renderer().into_raster())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_snapshot_is_reproducible() {
        let mut settings = Settings::default();
        settings.simulation.populate = true;
        settings.simulation.seed = Some(11);
        settings.display.cell_size = 3;

        let a = render_snapshot(&settings, 20, 10, 8).unwrap();
        let b = render_snapshot(&settings, 20, 10, 8).unwrap();

        assert_eq!((a.width(), a.height()), (60, 30));
        assert_eq!(a, b);
    }
}
