// Copyright (c) 2026 rezky_nightky

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tint {
    /// Dim foreground every cell falls back to.
    #[default]
    Base,
    Highlight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub tint: Tint,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        tint: Tint::Base,
    };

    pub fn highlighted(ch: char) -> Self {
        Self {
            ch,
            tint: Tint::Highlight,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
