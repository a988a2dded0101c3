// Copyright (c) 2026 rezky_nightky

use crate::cell::Cell;
use crate::grid::Grid;

pub const TEXT_ROWS: usize = 8;
pub const TEXT_COLS: usize = 111;

const TEXT: [&str; TEXT_ROWS] = [
    r"______               _  _     _____                      _                                _            __   __ ",
    r"| _  \               ()| |   |_   _|                    | |                              | |          / _| / _|",
    r"| | | |  ___   _ __  |/| |_    | |    ___   _   _   ___ | |__    _ __ ___   _   _   ___  | |_  _   _ | |_ | |_ ",
    r"| | | | / _ \ | '_ \   | __|   | |   / _ \ | | | | / __|| '_ \  | '_ ` _ \ | | | | / __| | __|| | | ||  _||  _|",
    r"| |/ / | (_) || | | |  | |_    | |  | (_) || |_| || (__ | | | | | | | | | || |_| | \__ \ | |_ | |_| || |  | |  ",
    r"|___ /  \___/ |_| |_|  \__ |    \_ / \___/  \__,_| \___||_| |_| |_| |_| |_| \__, | |___ / \__| \__,_||_|  |_|  ",
    r"                                                                             __/ |                             ",
    r"                                                                            |___ /                             ",
];

/// Static text block drawn centered over the rain. Spaces are transparent.
#[derive(Clone, Copy, Debug)]
pub struct Banner {
    rows: &'static [&'static str; TEXT_ROWS],
}

impl Default for Banner {
    fn default() -> Self {
        Self { rows: &TEXT }
    }
}

impl Banner {
    /// Top-left cell of the banner inside a `width` x `height` grid. Either
    /// coordinate is negative when the grid is smaller than the banner.
    pub fn origin(&self, width: u16, height: u16) -> (i32, i32) {
        let x = (width as i32 - TEXT_COLS as i32) / 2;
        let y = (height as i32 - TEXT_ROWS as i32) / 2;
        (x, y)
    }

    /// Overwrites every non-space banner cell, highlighted. Cells falling
    /// outside the grid are dropped.
    pub fn paint(&self, grid: &mut Grid) {
        let (start_x, start_y) = self.origin(grid.width, grid.height);
        for (row, line) in self.rows.iter().enumerate() {
            let y = start_y + row as i32;
            for (col, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let x = start_x + col as i32;
                let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
                    continue;
                };
                grid.set(x, y, Cell::highlighted(ch));
            }
        }
    }
}
