//! Display and output formatting utilities

use crate::game_of_life::World;

/// Format worlds for console output
pub struct WorldFormatter;

impl WorldFormatter {
    /// Format a world in compact form
    pub fn format_world_compact(world: &World) -> String {
        let mut output = String::new();
        for y in 0..world.height() {
            for x in 0..world.width() {
                output.push(if world.get(x, y) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a world with coordinates
    pub fn format_world_with_coords(world: &World) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..world.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for y in 0..world.height() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..world.width() {
                output.push_str(if world.get(x, y) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line statistics for a world
    pub fn format_statistics(world: &World, generation: usize) -> String {
        let area = world.width() * world.height();
        let density = if area > 0 {
            world.living_count() as f64 / area as f64 * 100.0
        } else {
            0.0
        };

        format!(
            "Generation {}: {}x{}, {} living cells ({:.1}%)",
            generation,
            world.width(),
            world.height(),
            world.living_count(),
            density
        )
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::io::parse_pattern;

    #[test]
    fn test_world_formatting() {
        let world = parse_pattern("101\n010\n101\n").unwrap();

        let compact = WorldFormatter::format_world_compact(&world);
        assert_eq!(compact, "█·█\n·█·\n█·█\n");

        let with_coords = WorldFormatter::format_world_with_coords(&world);
        assert!(with_coords.contains(" 0 1 2"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_statistics() {
        let world = parse_pattern("11\n00\n").unwrap();
        assert_eq!(
            WorldFormatter::format_statistics(&world, 3),
            "Generation 3: 2x2, 2 living cells (50.0%)"
        );
        assert!(WorldFormatter::format_statistics(&World::new(0, 0), 0).contains("(0.0%)"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Yellow);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
