// Copyright (c) 2026 rezky_nightky

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Char(char),
    /// Erases whatever the leading glyph left behind.
    Blank,
}

impl Glyph {
    pub fn as_char(self) -> char {
        match self {
            Glyph::Char(c) => c,
            Glyph::Blank => ' ',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Droplet {
    pub column: u16,
    /// Negative while still above the visible area.
    pub row: f64,
    pub speed: f64,
    pub glyph: Glyph,
}

impl Droplet {
    pub fn new(column: u16, row: f64, speed: f64, glyph: Glyph) -> Self {
        Self {
            column,
            row,
            speed,
            glyph,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.glyph == Glyph::Blank
    }

    fn last_row(height: u16) -> f64 {
        height as f64 - 1.0
    }

    /// Moves one tick down. Returns `true` when the droplet had already
    /// reached the last row and was put back at the top; the caller owes it a
    /// new speed.
    pub fn advance(&mut self, height: u16) -> bool {
        if self.row < Self::last_row(height) {
            self.row += self.speed;
            false
        } else {
            self.row = 0.0;
            true
        }
    }

    /// Screen row this droplet paints, if any. The last screen row is never
    /// painted.
    pub fn visible_row(&self, height: u16) -> Option<u16> {
        if self.row >= 0.0 && self.row < Self::last_row(height) {
            Some(self.row.floor() as u16)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_adds_speed_until_last_row() {
        let mut d = Droplet::new(3, 3.0, 1.0, Glyph::Char('X'));
        assert!(!d.advance(5));
        assert_eq!(d.row, 4.0);
        assert!(d.advance(5));
        assert_eq!(d.row, 0.0);
    }

    #[test]
    fn advance_from_above_screen_is_plain_addition() {
        let mut d = Droplet::new(0, -12.0, 0.73, Glyph::Blank);
        d.advance(20);
        assert_eq!(d.row, -12.0 + 0.73);
    }

    #[test]
    fn visible_row_excludes_above_screen_and_last_row() {
        let at = |row| Droplet::new(0, row, 1.0, Glyph::Blank).visible_row(5);
        assert_eq!(at(-0.5), None);
        assert_eq!(at(0.0), Some(0));
        assert_eq!(at(3.99), Some(3));
        assert_eq!(at(4.0), None);
        assert_eq!(at(7.0), None);
    }

    #[test]
    fn blank_glyph_renders_as_space() {
        assert_eq!(Glyph::Blank.as_char(), ' ');
        assert_eq!(Glyph::Char('q').as_char(), 'q');
    }
}
