// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};
use log::debug;

use crate::error::FrameError;
use crate::grid::Grid;
use crate::palette::{Palette, Pen};
use crate::runtime::DisplayMode;
use crate::surface::{viewport, Surface};

pub const TITLE: &str = "Don't Touch Please :)";

struct LastFrame {
    grid: Grid,
    origin: (u16, u16),
}

/// Crossterm-backed display surface living on the alternate screen.
pub struct Terminal {
    stdout: Stdout,
    palette: Palette,
    mode: DisplayMode,
    last: Option<LastFrame>,
    run_buf: String,
    keyboard_enhanced: bool,
    force_full: bool,
    restored: bool,
}

impl Terminal {
    pub fn new(palette: Palette) -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            let _ = out.execute(terminal::SetTitle(TITLE));
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }

        let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
            && out
                .execute(PushKeyboardEnhancementFlags(
                    // Enter only reports releases once every key is sent as
                    // an escape code.
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
                ))
                .is_ok();
        debug!("keyboard enhancement: {}", keyboard_enhanced);

        Ok(Self {
            stdout: out,
            palette,
            mode: DisplayMode::default(),
            last: None,
            run_buf: String::with_capacity(64),
            keyboard_enhanced,
            force_full: true,
            restored: false,
        })
    }

    /// Whether key release events will be delivered.
    pub fn reports_key_release(&self) -> bool {
        self.keyboard_enhanced || cfg!(windows)
    }

    fn queue_pen(&mut self, pen: Pen, cur: &mut Option<Pen>) -> Result<()> {
        if *cur == Some(pen) {
            return Ok(());
        }
        self.stdout
            .queue(SetForegroundColor(pen.fg.unwrap_or(Color::Reset)))?;
        self.stdout.queue(SetAttribute(if pen.bold {
            Attribute::Bold
        } else {
            Attribute::NormalIntensity
        }))?;
        *cur = Some(pen);
        Ok(())
    }

    fn draw(&mut self, grid: &Grid) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        let origin = (
            cols.saturating_sub(grid.width) / 2,
            rows.saturating_sub(grid.height) / 2,
        );
        let visible_w = grid.width.min(cols.saturating_sub(origin.0));
        let visible_h = grid.height.min(rows.saturating_sub(origin.1));

        let full_redraw = self.force_full
            || self
                .last
                .as_ref()
                .map(|l| {
                    l.origin != origin
                        || l.grid.width != grid.width
                        || l.grid.height != grid.height
                })
                .unwrap_or(true);
        if full_redraw {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut cur_pen: Option<Pen> = None;
        let mut cur_pos: Option<(u16, u16)> = None;
        let width = grid.width as usize;

        for y in 0..visible_h {
            let mut x = 0u16;
            while x < visible_w {
                let idx = y as usize * width + x as usize;
                let cell = grid.cells[idx];
                let unchanged = !full_redraw
                    && self
                        .last
                        .as_ref()
                        .is_some_and(|l| l.grid.cells.get(idx) == Some(&cell));
                if unchanged {
                    x += 1;
                    continue;
                }

                // Coalesce the following changed cells with the same tint.
                self.run_buf.clear();
                self.run_buf.push(cell.ch);
                let x0 = x;
                x += 1;
                while x < visible_w {
                    let i = y as usize * width + x as usize;
                    let next = grid.cells[i];
                    if next.tint != cell.tint {
                        break;
                    }
                    let same_as_last = !full_redraw
                        && self
                            .last
                            .as_ref()
                            .is_some_and(|l| l.grid.cells.get(i) == Some(&next));
                    if same_as_last {
                        break;
                    }
                    self.run_buf.push(next.ch);
                    x += 1;
                }

                let pos = (origin.0 + x0, origin.1 + y);
                if cur_pos != Some(pos) {
                    self.stdout.queue(cursor::MoveTo(pos.0, pos.1))?;
                }
                let pen = self.palette.pen(cell.tint);
                self.queue_pen(pen, &mut cur_pen)?;
                self.stdout.queue(Print(self.run_buf.as_str()))?;
                cur_pos = Some((origin.0 + x, origin.1 + y));
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        self.force_full = false;

        match self.last.as_mut() {
            Some(last) => {
                last.grid.clone_from(grid);
                last.origin = origin;
            }
            None => {
                self.last = Some(LastFrame {
                    grid: grid.clone(),
                    origin,
                })
            }
        }
        Ok(())
    }
}

impl Surface for Terminal {
    fn size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = terminal::size()?;
        Ok(viewport(self.mode, cols, rows))
    }

    fn set_mode(&mut self, mode: DisplayMode) -> Result<()> {
        self.mode = mode;
        self.force_full = true;
        Ok(())
    }

    fn present(&mut self, grid: &Grid) -> std::result::Result<(), FrameError> {
        self.draw(grid).map_err(FrameError)
    }

    fn read_back(&self) -> Option<&Grid> {
        self.last.as_ref().map(|l| &l.grid)
    }

    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        if self.keyboard_enhanced {
            let _ = self.stdout.execute(PopKeyboardEnhancementFlags);
        }
        self.stdout.execute(SetAttribute(Attribute::Reset))?;
        self.stdout.execute(ResetColor)?;
        self.stdout.execute(cursor::Show)?;
        self.stdout.execute(terminal::EnableLineWrap)?;
        self.stdout.execute(terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if !self.restored {
            let _ = self.restore();
            restore_terminal_best_effort();
        }
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
