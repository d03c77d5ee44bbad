use super::{cell_color, visible_size, Renderer, BACKGROUND, BORDER};
use crate::game_of_life::World;
use anyhow::Result;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Write};

/// Upper half block: foreground paints the top cell, background the bottom one
const HALF_BLOCK: char = '▀';

fn to_color([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

/// Draws the visible part of a world as colored half blocks, two cell rows per line
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn color_at(world: &World, column: usize, row: usize) -> Color {
        if world.get(column + BORDER, row + BORDER) {
            to_color(cell_color(column, row, world))
        } else {
            to_color(BACKGROUND)
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, world: &World) -> Result<()> {
        let (columns, rows) = visible_size(world);

        for line in 0..rows.div_ceil(2) {
            queue!(self.out, cursor::MoveTo(0, line as u16))?;

            let (mut fg, mut bg) = (None, None);
            for column in 0..columns {
                let top = Self::color_at(world, column, 2 * line);
                let bottom = if 2 * line + 1 < rows {
                    Self::color_at(world, column, 2 * line + 1)
                } else {
                    Color::Reset
                };

                if fg != Some(top) {
                    queue!(self.out, SetForegroundColor(top))?;
                    fg = Some(top);
                }
                if bg != Some(bottom) {
                    queue!(self.out, SetBackgroundColor(bottom))?;
                    bg = Some(bottom);
                }
                queue!(self.out, Print(HALF_BLOCK))?;
            }
            queue!(self.out, ResetColor)?;
        }

        self.out.flush()?;
        Ok(())
    }
}

/// Puts the terminal into raw mode on the alternate screen until dropped
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn start() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;
        Ok(Self { _private: () })
    }

    /// Visible cell columns and rows that fit the current terminal
    pub fn visible_cells() -> Result<(usize, usize)> {
        let (cols, rows) = terminal::size()?;
        Ok((cols as usize, 2 * rows as usize))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
