// Copyright (c) 2026 rezky_nightky

use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
};

use log::debug;

use crate::charset::CharacterSet;
use crate::droplet::{Droplet, Glyph};

/// Longest erasing tail behind a glyph.
pub const MAX_TRAIL_LENGTH: u16 = 30;
/// Farthest above the screen a fresh glyph may start.
pub const MAX_SPACE_BETWEEN_TRAILS: u16 = 50;

/// The two droplets living in one column: the visible glyph and the blank
/// that follows it, `trail` rows higher, wiping its old positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropPair {
    pub glyph: Droplet,
    pub eraser: Droplet,
}

pub struct DropField {
    pairs: Vec<DropPair>,
    charset: CharacterSet,
    rng: StdRng,

    rand_gap: Uniform<u16>,
    rand_trail: Uniform<u16>,
    // Speeds are drawn in hundredths of a row per tick.
    rand_spawn_speed: Uniform<u16>,
    rand_wrap_speed: Uniform<u16>,
}

impl DropField {
    pub fn new(charset: CharacterSet, rng: StdRng) -> Self {
        Self {
            pairs: Vec::new(),
            charset,
            rng,
            rand_gap: Uniform::new_inclusive(1, MAX_SPACE_BETWEEN_TRAILS).expect("valid range"),
            rand_trail: Uniform::new_inclusive(1, MAX_TRAIL_LENGTH).expect("valid range"),
            rand_spawn_speed: Uniform::new_inclusive(50, 100).expect("valid range"),
            rand_wrap_speed: Uniform::new_inclusive(1, 100).expect("valid range"),
        }
    }

    /// Drops every droplet and spawns one fresh pair per column.
    pub fn initialize(&mut self, width: u16, height: u16) {
        self.pairs.clear();
        self.pairs.reserve_exact(width as usize);
        for col in 0..width {
            let pair = self.spawn_pair(col);
            self.pairs.push(pair);
        }
        debug!("spawned {} drop pairs for {}x{}", width, width, height);
    }

    fn spawn_pair(&mut self, column: u16) -> DropPair {
        let start_row = -(self.rand_gap.sample(&mut self.rng) as f64);
        let speed = self.rand_spawn_speed.sample(&mut self.rng) as f64 / 100.0;
        let trail = self.rand_trail.sample(&mut self.rng) as f64;
        let ch = self.charset.sample(&mut self.rng);

        DropPair {
            glyph: Droplet::new(column, start_row, speed, Glyph::Char(ch)),
            eraser: Droplet::new(column, start_row - trail, speed, Glyph::Blank),
        }
    }

    /// One simulation tick for every droplet.
    pub fn update(&mut self, height: u16) {
        for pair in &mut self.pairs {
            for d in [&mut pair.glyph, &mut pair.eraser] {
                if d.advance(height) {
                    d.speed = self.rand_wrap_speed.sample(&mut self.rng) as f64 / 100.0;
                }
                if !d.is_blank() {
                    d.glyph = Glyph::Char(self.charset.sample(&mut self.rng));
                }
            }
        }
    }

    #[cfg(test)]
    pub fn pairs(&self) -> &[DropPair] {
        &self.pairs
    }

    pub fn droplets(&self) -> impl Iterator<Item = &Droplet> + '_ {
        self.pairs.iter().flat_map(|p| [&p.glyph, &p.eraser])
    }

    #[cfg(test)]
    pub fn droplet_count(&self) -> usize {
        self.pairs.len() * 2
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn make_field(seed: u64) -> DropField {
        DropField::new(CharacterSet::standard(), StdRng::seed_from_u64(seed))
    }

    fn is_hundredths(v: f64) -> bool {
        ((v * 100.0).round() - v * 100.0).abs() < 1e-9
    }

    #[test]
    fn initialize_spawns_one_pair_per_column() {
        let mut field = make_field(1);
        field.initialize(40, 20);
        assert_eq!(field.pairs().len(), 40);
        assert_eq!(field.droplet_count(), 80);
        for (col, pair) in field.pairs().iter().enumerate() {
            assert_eq!(pair.glyph.column as usize, col);
            assert_eq!(pair.eraser.column as usize, col);
        }
    }

    #[test]
    fn spawned_pairs_keep_the_trail_invariant() {
        let mut field = make_field(2);
        field.initialize(200, 30);
        let charset = CharacterSet::standard();
        for pair in field.pairs() {
            let g = pair.glyph;
            let e = pair.eraser;

            assert!(matches!(g.glyph, Glyph::Char(c) if charset.contains(c)));
            assert_eq!(e.glyph, Glyph::Blank);
            assert_eq!(g.speed, e.speed);

            assert!((0.5..=1.0).contains(&g.speed), "speed {}", g.speed);
            assert!(is_hundredths(g.speed));

            assert!(g.row <= -1.0 && g.row >= -(MAX_SPACE_BETWEEN_TRAILS as f64));
            let trail = g.row - e.row;
            assert!(trail >= 1.0 && trail <= MAX_TRAIL_LENGTH as f64, "trail {}", trail);
        }
    }

    #[test]
    fn reinitialize_discards_old_columns() {
        let mut field = make_field(3);
        field.initialize(50, 10);
        field.update(10);
        field.initialize(12, 40);
        assert_eq!(field.pairs().len(), 12);
        assert!(field.droplets().all(|d| d.row < 0.0));
    }

    #[test]
    fn single_droplet_falls_then_wraps() {
        let mut field = make_field(4);
        field.initialize(10, 5);
        field.pairs.truncate(1);
        field.pairs[0].glyph = Droplet::new(3, 3.0, 1.0, Glyph::Char('X'));
        field.pairs[0].eraser = Droplet::new(3, -40.0, 1.0, Glyph::Blank);

        field.update(5);
        assert_eq!(field.pairs[0].glyph.row, 4.0);

        field.update(5);
        let g = field.pairs[0].glyph;
        assert_eq!(g.row, 0.0);
        assert!(g.speed > 0.0 && g.speed <= 1.0);
        assert!(is_hundredths(g.speed));
        assert_eq!(g.column, 3);
    }

    #[test]
    fn update_moves_by_exactly_speed_below_last_row() {
        let mut field = make_field(5);
        field.initialize(30, 25);
        for _ in 0..10 {
            let before: Vec<Droplet> = field.droplets().copied().collect();
            field.update(25);
            for (b, a) in before.iter().zip(field.droplets()) {
                if b.row < 24.0 {
                    assert_eq!(a.row, b.row + b.speed);
                    assert_eq!(a.speed, b.speed);
                } else {
                    assert_eq!(a.row, 0.0);
                }
            }
        }
    }

    #[test]
    fn columns_and_positive_speed_hold_over_many_ticks() {
        let mut field = make_field(6);
        field.initialize(16, 8);
        let columns: Vec<u16> = field.droplets().map(|d| d.column).collect();
        for _ in 0..2000 {
            field.update(8);
            assert!(field.droplets().all(|d| d.speed > 0.0 && d.speed <= 1.0));
        }
        let after: Vec<u16> = field.droplets().map(|d| d.column).collect();
        assert_eq!(columns, after);
    }

    #[test]
    fn erasers_never_change_character() {
        let mut field = make_field(7);
        field.initialize(16, 8);
        for _ in 0..500 {
            field.update(8);
            assert!(field.pairs().iter().all(|p| p.eraser.glyph == Glyph::Blank));
            assert!(field.pairs().iter().all(|p| !p.glyph.is_blank()));
        }
    }

    // Current behavior: once the glyph wraps, the eraser is no longer
    // trailing it.
    #[test]
    fn wrap_does_not_reestablish_trail_offset() {
        let mut field = make_field(8);
        field.initialize(1, 5);
        field.pairs[0].glyph = Droplet::new(0, 4.0, 1.0, Glyph::Char('A'));
        field.pairs[0].eraser = Droplet::new(0, 2.0, 1.0, Glyph::Blank);

        field.update(5);
        let p = field.pairs[0];
        assert_eq!(p.glyph.row, 0.0);
        assert_eq!(p.eraser.row, 3.0);
        assert!(p.eraser.row > p.glyph.row);
    }
}
