use crate::game_of_life::World;
use chrono::{NaiveTime, Timelike};
use log::debug;

pub const GLYPH_WIDTH: usize = 4;
pub const GLYPH_HEIGHT: usize = 5;

/// Row of the world where the top of every digit is drawn
pub const CLOCK_TOP: usize = 11;

/// Horizontal offset of each digit from the world's center column, `HH MM SS`
const DIGIT_OFFSETS: [isize; 6] = [-17, -12, -5, 0, 7, 12];

const GLYPHS: [[&str; GLYPH_HEIGHT]; 10] = [
    [" ## ", "#  #", "#  #", "#  #", " ## "],
    ["  # ", " ## ", "  # ", "  # ", " ###"],
    [" ## ", "#  #", "  # ", " #  ", "####"],
    ["### ", "   #", " ## ", "   #", "### "],
    ["#  #", "#  #", "####", "   #", "   #"],
    ["####", "#   ", "### ", "   #", "### "],
    [" ## ", "#   ", "### ", "#  #", " ## "],
    ["####", "   #", "  # ", " #  ", " #  "],
    [" ## ", "#  #", " ## ", "#  #", " ## "],
    [" ## ", "#  #", " ###", "   #", " ## "],
];

/// Force the 4x5 block at `(left, top)` to the shape of `digit`
///
/// Returns false without touching the world if the block does not fit.
pub fn stamp_digit(world: &mut World, left: usize, top: usize, digit: u8) -> bool {
    let Some(glyph) = GLYPHS.get(digit as usize) else {
        return false;
    };
    if left + GLYPH_WIDTH > world.width() || top + GLYPH_HEIGHT > world.height() {
        return false;
    }

    for (dy, row) in glyph.iter().enumerate() {
        for (dx, ch) in row.bytes().enumerate() {
            world.put(left + dx, top + dy, ch == b'#');
        }
    }
    true
}

/// Left column of each of the six digits, if the whole clock fits in the world
pub fn digit_positions(world: &World) -> Option<[usize; 6]> {
    let center = (world.width() / 2) as isize;
    if CLOCK_TOP + GLYPH_HEIGHT > world.height() {
        return None;
    }

    let mut positions = [0; 6];
    for (slot, offset) in positions.iter_mut().zip(DIGIT_OFFSETS) {
        let left = usize::try_from(center + offset).ok()?;
        if left + GLYPH_WIDTH > world.width() {
            return None;
        }
        *slot = left;
    }
    Some(positions)
}

/// Draw `HH MM SS` into the world
///
/// Returns false and leaves the world as is when it is too small to hold the clock.
pub fn stamp_time(world: &mut World, time: NaiveTime) -> bool {
    let Some(positions) = digit_positions(world) else {
        debug!(
            "{}x{} world too small for the clock overlay",
            world.width(),
            world.height()
        );
        return false;
    };

    let digits = [time.hour(), time.minute(), time.second()]
        .into_iter()
        .flat_map(|v| [(v / 10) as u8, (v % 10) as u8]);

    for (left, digit) in positions.into_iter().zip(digits) {
        stamp_digit(world, left, CLOCK_TOP, digit);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(world: &World, left: usize, top: usize) -> Vec<String> {
        (0..GLYPH_HEIGHT)
            .map(|dy| {
                (0..GLYPH_WIDTH)
                    .map(|dx| if world.get(left + dx, top + dy) { '#' } else { ' ' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_stamp_digit_overwrites_block() {
        let mut world = World::new(6, 6);
        for y in 0..6 {
            for x in 0..6 {
                world.set(x, y, true).unwrap();
            }
        }

        assert!(stamp_digit(&mut world, 1, 1, 0));
        assert_eq!(block(&world, 1, 1), GLYPHS[0]);
        // Cells outside the block keep their state
        assert!(world.get(0, 0));
        assert!(world.get(5, 5));
    }

    #[test]
    fn test_stamp_digit_rejects_out_of_bounds() {
        let mut world = World::new(4, 4);
        assert!(!stamp_digit(&mut world, 0, 0, 1));
        assert!(!stamp_digit(&mut world, 0, 0, 10));
        assert!(world.is_extinct());
    }

    #[test]
    fn test_stamp_time() {
        let mut world = World::new(40, 20);
        let time = NaiveTime::from_hms_opt(9, 41, 7).unwrap();

        assert!(stamp_time(&mut world, time));
        let positions = digit_positions(&world).unwrap();
        assert_eq!(positions, [3, 8, 15, 20, 27, 32]);

        for (left, digit) in positions.into_iter().zip([0, 9, 4, 1, 0, 7]) {
            assert_eq!(block(&world, left, CLOCK_TOP), GLYPHS[digit]);
        }
    }

    #[test]
    fn test_clock_skipped_on_small_world() {
        let mut narrow = World::new(30, 20);
        assert!(!stamp_time(&mut narrow, NaiveTime::MIN));
        assert!(narrow.is_extinct());

        let short = World::new(40, 15);
        assert!(digit_positions(&short).is_none());
    }
}
