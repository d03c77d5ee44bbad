//! Rendering of worlds onto raster and terminal surfaces
//!
//! The simulated world carries a one-cell hidden border around the visible
//! area. Renderers only ever draw the interior.

pub mod raster;
pub mod terminal;

pub use raster::{Raster, RasterRenderer};
pub use terminal::{TerminalRenderer, TerminalSession};

use crate::game_of_life::World;
use anyhow::Result;

/// Width of the hidden frame on each side of the visible area
pub const BORDER: usize = 1;

/// Something that draws a world
///
/// Rendering never changes the world.
pub trait Renderer {
    fn render(&mut self, world: &World) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, world: &World) -> Result<()> {
        (**self).render(world)
    }
}

/// Discards every frame, for headless runs
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _world: &World) -> Result<()> {
        Ok(())
    }
}

/// World dimensions needed to show `columns x rows` visible cells
pub fn world_size_for(columns: usize, rows: usize) -> (usize, usize) {
    (columns + 2 * BORDER, rows + 2 * BORDER)
}

/// Visible dimensions of a world, excluding the hidden border
pub fn visible_size(world: &World) -> (usize, usize) {
    (
        world.width().saturating_sub(2 * BORDER),
        world.height().saturating_sub(2 * BORDER),
    )
}

/// Color of the empty canvas
pub const BACKGROUND: [u8; 3] = [11, 11, 20];

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Color of a live visible cell
///
/// Red grows from the left column to the right, green from the bottom row up
/// to the top, so the brightest corner is the top-right.
pub fn cell_color(column: usize, row: usize, world: &World) -> [u8; 3] {
    let width = world.width().max(1) as f64;
    let height = world.height().max(1) as f64;
    let from_bottom = visible_size(world).1.saturating_sub(row + 1);

    [
        channel(column as f64 / width * 0.75 + 0.25 + 0.045),
        channel(from_bottom as f64 / height * 0.75 + 0.25 + 0.045),
        channel(0.75 + 0.08),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_dimensions() {
        assert_eq!(world_size_for(10, 4), (12, 6));
        assert_eq!(visible_size(&World::new(12, 6)), (10, 4));
        assert_eq!(visible_size(&World::new(1, 0)), (0, 0));
    }

    #[test]
    fn test_cell_color_gradient() {
        let world = World::new(100, 50);

        // 98x48 visible cells
        let bottom_left = cell_color(0, 47, &world);
        assert_eq!(bottom_left, [75, 75, 212]);

        let top_left = cell_color(0, 0, &world);
        assert_eq!(top_left, [75, 255, 212]);

        let top_right = cell_color(97, 0, &world);
        assert!(top_right[0] > top_left[0]);
        assert_eq!(top_right[1], top_left[1]);
        assert_eq!(top_right[2], bottom_left[2]);
    }
}
