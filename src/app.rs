// Copyright (c) 2026 rezky_nightky

use std::io;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::banner::Banner;
use crate::field::DropField;
use crate::grid::Grid;
use crate::input::InputSource;
use crate::runtime::{DisplayMode, LoopState};
use crate::surface::Surface;

pub const TICKS_PER_SECOND: f64 = 60.0;

/// Fixed-rate simulation clock, independent of how often frames are drawn.
#[derive(Clone, Debug)]
pub struct TickTimer {
    period: Duration,
    last: Instant,
}

impl TickTimer {
    pub fn new(ticks_per_second: f64, now: Instant) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / ticks_per_second),
            last: now,
        }
    }

    /// `true` once more than one period has passed since the last tick; the
    /// next period then starts at `now`.
    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) > self.period {
            self.last = now;
            true
        } else {
            false
        }
    }
}

/// Consecutive failed frames. Only the first failure of a run is reported
/// so a dead output cannot flood stderr, which shares the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FailureStreak {
    len: u32,
}

impl FailureStreak {
    /// Records a failure; `true` when it starts a new streak.
    pub fn fail(&mut self) -> bool {
        self.len = self.len.saturating_add(1);
        self.len == 1
    }

    /// Records a success; returns the length of the streak it ended.
    pub fn recover(&mut self) -> Option<u32> {
        match std::mem::take(&mut self.len) {
            0 => None,
            n => Some(n),
        }
    }
}

/// Everything one run of the rain owns between re-initialisations.
pub struct SimulationState {
    pub mode: DisplayMode,
    pub width: u16,
    pub height: u16,
    pub field: DropField,
    pub grid: Grid,
    banner: Banner,
}

impl SimulationState {
    pub fn new(field: DropField) -> Self {
        Self {
            mode: DisplayMode::default(),
            width: 0,
            height: 0,
            field,
            grid: Grid::new(0, 0),
            banner: Banner::default(),
        }
    }

    /// Respawns all drops and rebuilds the grid for new dimensions.
    pub fn reinitialize(&mut self, width: u16, height: u16, seed: Option<&Grid>) {
        self.width = width;
        self.height = height;
        self.field.initialize(width, height);
        self.grid = Grid::seeded(width, height, seed);
    }

    pub fn tick(&mut self) {
        self.field.update(self.height);
    }

    /// Base tint, then drops, then the banner on top.
    pub fn compose(&mut self) {
        self.grid.paint_base();
        self.grid.paint_drops(self.field.droplets());
        self.banner.paint(&mut self.grid);
    }
}

pub struct Rain<S: Surface, I: InputSource> {
    surface: S,
    input: I,
    sim: SimulationState,
    timer: TickTimer,
    state: LoopState,
    failed_frames: FailureStreak,
}

impl<S: Surface, I: InputSource> Rain<S, I> {
    pub fn new(mut surface: S, input: I, field: DropField, now: Instant) -> io::Result<Self> {
        let mut sim = SimulationState::new(field);
        surface.set_mode(sim.mode)?;
        let (w, h) = surface.size()?;
        sim.reinitialize(w, h, surface.read_back());
        info!("rain started at {}x{} ({:?})", w, h, sim.mode);

        Ok(Self {
            surface,
            input,
            sim,
            timer: TickTimer::new(TICKS_PER_SECOND, now),
            state: LoopState::Running,
            failed_frames: FailureStreak::default(),
        })
    }

    fn reshape(&mut self) -> io::Result<()> {
        let (w, h) = self.surface.size()?;
        self.sim.reinitialize(w, h, self.surface.read_back());
        debug!("reinitialized at {}x{}", w, h);
        Ok(())
    }

    fn toggle(&mut self) -> io::Result<()> {
        let next = self.sim.mode.toggled();
        if let Err(e) = self.surface.set_mode(next) {
            warn!("couldn't switch to {:?}: {}", next, e);
            return Ok(());
        }
        self.sim.mode = next;
        self.reshape()?;
        info!(
            "display mode {:?} at {}x{}",
            next, self.sim.width, self.sim.height
        );
        Ok(())
    }

    /// One loop iteration: input, maybe one simulation tick, always one frame.
    pub fn step(&mut self, now: Instant) -> io::Result<LoopState> {
        if self.state == LoopState::Exiting {
            return Ok(LoopState::Exiting);
        }

        let signals = self.input.poll()?;

        if signals.exit {
            self.state = LoopState::Exiting;
            self.surface.restore()?;
            return Ok(self.state);
        }

        if signals.toggle {
            self.state = LoopState::Toggling;
            self.toggle()?;
            self.state = LoopState::Running;
        } else if signals.resized {
            // Force the surface to repaint from scratch at the new size.
            self.surface.set_mode(self.sim.mode)?;
            self.reshape()?;
        }

        if self.timer.due(now) {
            self.sim.tick();
        }

        self.sim.compose();
        match self.surface.present(&self.sim.grid) {
            Ok(()) => {
                if let Some(n) = self.failed_frames.recover() {
                    info!("frames presenting again after {} failures", n);
                }
            }
            Err(e) => {
                if self.failed_frames.fail() {
                    warn!("{}; further failures are not reported", e);
                }
            }
        }

        Ok(self.state)
    }

    pub fn run(mut self) -> io::Result<()> {
        while self.step(Instant::now())? != LoopState::Exiting {}
        Ok(())
    }
}
