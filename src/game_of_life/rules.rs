//! Game of Life rules implementation (B3/S23, hard boundary)

use super::World;
use rayon::prelude::*;

/// Whether a cell is alive in the next generation given its state and live neighbor count
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Evolve the world one generation forward
///
/// Neighbors outside the world are dead; there is no wraparound. Every cell of
/// the result is computed from `current`, nothing is updated in place.
pub fn step(current: &World) -> World {
    let (width, height) = (current.width(), current.height());

    let cells = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| next_state(current.get(x, y), current.count_neighbors(x, y)))
        .collect();

    World::from_cells(width, height, cells)
}

/// Same result as [`step`], with rows computed in parallel
pub fn step_parallel(current: &World) -> World {
    let (width, height) = (current.width(), current.height());

    let cells: Vec<bool> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| {
            (0..width).map(move |x| next_state(current.get(x, y), current.count_neighbors(x, y)))
        })
        .collect();

    World::from_cells(width, height, cells)
}

/// Evolve the world for multiple generations
pub fn step_generations(mut world: World, generations: usize) -> World {
    for _ in 0..generations {
        world = step(&world);
    }
    world
}
