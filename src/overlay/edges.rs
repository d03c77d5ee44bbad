use crate::game_of_life::World;
use rand::Rng;

/// Re-roll every cell on the outermost ring, each alive with probability `density`
///
/// Overwrites whatever the step produced there. Interior cells are untouched.
pub fn randomize_edges<R: Rng>(world: &mut World, density: f64, rng: &mut R) {
    let (width, height) = (world.width(), world.height());
    if width == 0 || height == 0 {
        return;
    }

    let ring = (0..width)
        .flat_map(|x| [(x, 0), (x, height - 1)])
        .chain((0..height).flat_map(|y| [(0, y), (width - 1, y)]));

    for (x, y) in ring {
        world.put(x, y, rng.random::<f64>() < density);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn on_ring(world: &World, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == world.width() - 1 || y == world.height() - 1
    }

    #[test]
    fn test_full_density_fills_ring_only() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new(6, 5);
        randomize_edges(&mut world, 1.0, &mut rng);

        for y in 0..5 {
            for x in 0..6 {
                assert_eq!(world.get(x, y), on_ring(&world, x, y), "cell ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_zero_density_clears_ring_keeps_interior() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut world = World::random(7, 7, 1.0, &mut rng);
        randomize_edges(&mut world, 0.0, &mut rng);

        assert_eq!(world.living_count(), 5 * 5);
        assert!(!world.get(0, 3));
        assert!(world.get(1, 1));
    }

    #[test]
    fn test_degenerate_worlds() {
        let mut rng = StdRng::seed_from_u64(3);

        let mut empty = World::new(0, 0);
        randomize_edges(&mut empty, 1.0, &mut rng);

        let mut single = World::new(1, 1);
        randomize_edges(&mut single, 1.0, &mut rng);
        assert!(single.get(0, 0));
    }
}
