//! File I/O operations for seed patterns

use super::World;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a pattern from a text file
/// Format: one row per line, '1', '#' or 'O' for alive cells and '0' or '.' for dead cells
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<World> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse a pattern from its string representation
pub fn parse_pattern(content: &str) -> Result<World> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let rows = lines
        .iter()
        .enumerate()
        .map(|(y, line)| {
            line.chars()
                .enumerate()
                .map(|(x, ch)| match ch {
                    '1' | '#' | 'O' => Ok(true),
                    '0' | '.' => Ok(false),
                    _ => anyhow::bail!("Invalid character '{}' at position ({}, {})", ch, x, y),
                })
                .collect::<Result<Vec<bool>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    World::from_rows(rows)
}

/// Convert a world to the '0'/'1' text representation
pub fn world_to_string(world: &World) -> String {
    let mut result = String::with_capacity(world.height() * (world.width() + 1));

    for y in 0..world.height() {
        for x in 0..world.width() {
            result.push(if world.get(x, y) { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Save a world to a text file
pub fn save_world_to_file<P: AsRef<Path>>(world: &World, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, world_to_string(world))
        .with_context(|| format!("Failed to write world to file: {}", path.as_ref().display()))
}

/// Stamp `pattern` into the middle of `world`
pub fn place_centered(world: &mut World, pattern: &World) -> Result<()> {
    let left = world.width().saturating_sub(pattern.width()) / 2;
    let top = world.height().saturating_sub(pattern.height()) / 2;
    world.stamp(pattern, left, top)
}

/// Create example pattern files
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        ("glider.txt", ".#...\n..#..\n###..\n.....\n.....\n"),
        ("blinker.txt", ".....\n.###.\n.....\n"),
        ("block.txt", "....\n.##.\n.##.\n....\n"),
        ("beacon.txt", "##..\n##..\n..##\n..##\n"),
        ("r_pentomino.txt", ".##\n##.\n.#.\n"),
    ];

    for (name, content) in examples {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_pattern() {
        let world = parse_pattern("010\n#.O\n\n...\n").unwrap();

        assert_eq!(world.width(), 3);
        assert_eq!(world.height(), 3);
        assert_eq!(world.living_cells(), vec![(1, 0), (0, 1), (2, 1)]);
    }

    #[test]
    fn test_world_to_string() {
        let world = parse_pattern(".#.\n#.#\n").unwrap();
        assert_eq!(world_to_string(&world), "010\n101\n");
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_pattern("010\n1X1\n010\n").is_err());
        assert!(parse_pattern("010\n11\n010\n").is_err());
        assert!(parse_pattern("").is_err());
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/test_world.txt");

        let original = parse_pattern("101\n010\n").unwrap();
        save_world_to_file(&original, &file_path).unwrap();
        let loaded = load_pattern_from_file(&file_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_place_centered() {
        let mut world = World::new(7, 7);
        let pattern = parse_pattern("###\n").unwrap();

        place_centered(&mut world, &pattern).unwrap();
        assert_eq!(world.living_cells(), vec![(2, 3), (3, 3), (4, 3)]);

        let wide = parse_pattern("########\n").unwrap();
        assert!(place_centered(&mut world, &wide).is_err());
    }

    #[test]
    fn test_create_example_patterns() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();

        assert!(temp_dir.path().join("blinker.txt").exists());
        assert!(temp_dir.path().join("beacon.txt").exists());

        let glider = load_pattern_from_file(temp_dir.path().join("glider.txt")).unwrap();
        assert_eq!((glider.width(), glider.height()), (5, 5));
        assert_eq!(glider.living_count(), 5);
    }
}
