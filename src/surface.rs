// Copyright (c) 2026 rezky_nightky

use std::io;

use crate::error::FrameError;
use crate::grid::Grid;
use crate::runtime::DisplayMode;

/// Largest viewport used in windowed mode. Wide enough for the banner.
pub const WINDOWED_COLS: u16 = 120;
pub const WINDOWED_ROWS: u16 = 30;

/// Somewhere a finished grid can be shown.
pub trait Surface {
    /// Cell dimensions of the area frames are presented into, for the
    /// current display mode.
    fn size(&self) -> io::Result<(u16, u16)>;

    fn set_mode(&mut self, mode: DisplayMode) -> io::Result<()>;

    /// Shows one complete frame.
    fn present(&mut self, grid: &Grid) -> Result<(), FrameError>;

    /// The frame currently on screen, if one was presented.
    fn read_back(&self) -> Option<&Grid>;

    /// Puts the display back the way it was found.
    fn restore(&mut self) -> io::Result<()>;
}

/// Area frames use inside a `cols` x `rows` terminal.
pub fn viewport(mode: DisplayMode, cols: u16, rows: u16) -> (u16, u16) {
    match mode {
        DisplayMode::Windowed => (cols.min(WINDOWED_COLS), rows.min(WINDOWED_ROWS)),
        DisplayMode::Fullscreen => (cols, rows),
    }
}

#[cfg(test)]
pub use memory::MemorySurface;

#[cfg(test)]
mod memory {
    use super::*;

    /// Keeps presented frames in memory.
    #[derive(Debug, Default)]
    pub struct MemorySurface {
        pub term_size: (u16, u16),
        pub mode: DisplayMode,
        pub mode_changes: Vec<DisplayMode>,
        pub last: Option<Grid>,
        pub presented: usize,
        pub fail_presents: usize,
        pub restored: bool,
    }

    impl MemorySurface {
        pub fn new(cols: u16, rows: u16) -> Self {
            Self {
                term_size: (cols, rows),
                ..Self::default()
            }
        }
    }

    impl Surface for MemorySurface {
        fn size(&self) -> io::Result<(u16, u16)> {
            Ok(viewport(self.mode, self.term_size.0, self.term_size.1))
        }

        fn set_mode(&mut self, mode: DisplayMode) -> io::Result<()> {
            self.mode = mode;
            self.mode_changes.push(mode);
            Ok(())
        }

        fn present(&mut self, grid: &Grid) -> Result<(), FrameError> {
            if self.fail_presents > 0 {
                self.fail_presents -= 1;
                return Err(FrameError(io::Error::other("surface unavailable")));
            }
            self.last = Some(grid.clone());
            self.presented += 1;
            Ok(())
        }

        fn read_back(&self) -> Option<&Grid> {
            self.last.as_ref()
        }

        fn restore(&mut self) -> io::Result<()> {
            self.restored = true;
            Ok(())
        }
    }
}
