// Copyright (c) 2026 rezky_nightky

use crate::cell::{Cell, Tint};
use crate::droplet::Droplet;

/// Character + tint buffer composited once per frame and handed to the
/// display surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; len],
        }
    }

    /// A fresh grid carrying over whatever characters `seed` shows in the
    /// region both sizes share.
    pub fn seeded(width: u16, height: u16, seed: Option<&Grid>) -> Self {
        let mut grid = Self::new(width, height);
        if let Some(seed) = seed {
            for y in 0..height.min(seed.height) {
                for x in 0..width.min(seed.width) {
                    if let (Some(dst), Some(src)) = (grid.index(x, y), seed.get(x, y)) {
                        grid.cells[dst].ch = src.ch;
                    }
                }
            }
        }
        grid
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Recolors every cell with the base tint. Characters stay as they are.
    pub fn paint_base(&mut self) {
        for cell in &mut self.cells {
            cell.tint = Tint::Base;
        }
    }

    /// Writes each visible droplet's glyph, highlighted, at its cell.
    pub fn paint_drops<'a, I>(&mut self, drops: I)
    where
        I: IntoIterator<Item = &'a Droplet>,
    {
        for d in drops {
            let Some(row) = d.visible_row(self.height) else {
                continue;
            };
            self.set(d.column, row, Cell::highlighted(d.glyph.as_char()));
        }
    }
}
