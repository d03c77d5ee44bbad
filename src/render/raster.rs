use super::{cell_color, visible_size, Renderer, BACKGROUND, BORDER};
use crate::game_of_life::World;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// An RGBA8 pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        let mut pixels = Vec::with_capacity(4 * width * height);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], 0xff]);
        }

        Self { width, height, pixels }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes, row-major
    pub fn frame(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = 4 * (y * self.width + x);
        let mut px = [0; 4];
        px.copy_from_slice(&self.pixels[i..i + 4]);
        Some(px)
    }

    /// Encode as a binary PPM (P6) image, dropping alpha
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        for px in self.pixels.chunks_exact(4) {
            out.write_all(&px[..3])?;
        }
        Ok(())
    }

    pub fn save_ppm<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut buf = Vec::with_capacity(self.pixels.len() / 4 * 3 + 32);
        self.write_ppm(&mut buf)?;
        std::fs::write(path, buf)
            .with_context(|| format!("Failed to write image: {}", path.display()))
    }
}

/// Fills one `cell_size` square per live cell, leaving `margin` pixels
/// empty along the top and left edge of every cell
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    raster: Raster,
    cell_size: usize,
    margin: usize,
}

impl RasterRenderer {
    pub fn new(columns: usize, rows: usize, cell_size: u32, margin: u32) -> Self {
        let cell_size = cell_size.max(1) as usize;

        Self {
            raster: Raster::new(columns * cell_size, rows * cell_size),
            cell_size,
            margin: margin as usize,
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn into_raster(self) -> Raster {
        self.raster
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, world: &World) -> Result<()> {
        let (columns, rows) = visible_size(world);
        let cs = self.cell_size;
        if columns * cs != self.raster.width || rows * cs != self.raster.height {
            anyhow::bail!(
                "{}x{} world does not match {}x{} raster at cell size {}",
                world.width(), world.height(), self.raster.width, self.raster.height, cs
            );
        }

        let width = self.raster.width;
        for (i, pix) in self.raster.pixels.chunks_exact_mut(4).enumerate() {
            let (px, py) = (i % width, i / width);
            let (cx, cy) = (px / cs, py / cs);

            let lit = world.get(cx + BORDER, cy + BORDER)
                && px - cx * cs >= self.margin
                && py - cy * cs >= self.margin;

            let rgb = if lit { cell_color(cx, cy, world) } else { BACKGROUND };
            pix.copy_from_slice(&[rgb[0], rgb[1], rgb[2], 0xff]);
        }

        Ok(())
    }
}
