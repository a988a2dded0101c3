// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::cell::Tint;
use crate::runtime::ColorMode;

const BASE_RGB: (u8, u8, u8) = (0, 128, 0);
const HIGHLIGHT_RGB: (u8, u8, u8) = (255, 255, 255);

/// How a tint is written to the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pen {
    pub fg: Option<Color>,
    pub bold: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub base: Pen,
    pub highlight: Pen,
}

impl Palette {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            base: Pen {
                fg: color_for(mode, BASE_RGB),
                bold: false,
            },
            highlight: Pen {
                fg: color_for(mode, HIGHLIGHT_RGB),
                bold: true,
            },
        }
    }

    pub fn pen(&self, tint: Tint) -> Pen {
        match tint {
            Tint::Base => self.base,
            Tint::Highlight => self.highlight,
        }
    }
}

/// Picks a color mode from `COLORTERM` and `TERM`.
pub fn detect_color_mode(colorterm: &str, term: &str) -> ColorMode {
    let colorterm = colorterm.to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = term.to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }
    if term.contains("256color") {
        return ColorMode::Color256;
    }
    if term.is_empty() || term == "linux" || term.starts_with("vt") {
        return ColorMode::Color16;
    }

    ColorMode::Color256
}

pub fn detect_color_mode_from_env() -> ColorMode {
    let colorterm = std::env::var("COLORTERM").unwrap_or_default();
    let term = std::env::var("TERM").unwrap_or_default();
    detect_color_mode(&colorterm, &term)
}

fn color_for(mode: ColorMode, (r, g, b): (u8, u8, u8)) -> Option<Color> {
    match mode {
        ColorMode::Mono => None,
        ColorMode::Color16 => Some(rgb_to_color16(r, g, b)),
        ColorMode::Color256 => Some(Color::AnsiValue(rgb_to_ansi256(r, g, b))),
        ColorMode::TrueColor => Some(Color::Rgb { r, g, b }),
    }
}

fn dist2(r0: u8, g0: u8, b0: u8, r1: u8, g1: u8, b1: u8) -> i32 {
    let dr = (r0 as i32) - (r1 as i32);
    let dg = (g0 as i32) - (g1 as i32);
    let db = (b0 as i32) - (b1 as i32);
    (dr * dr) + (dg * dg) + (db * db)
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let level = |v: u8| ((v as u16 * 5) + 127) / 255;
    let (r6, g6, b6) = (level(r), level(g), level(b));
    let cube_idx = 16 + (36 * r6 as u8) + (6 * g6 as u8) + (b6 as u8);
    let cube_dist = dist2(
        r,
        g,
        b,
        CUBE_LEVELS[r6 as usize],
        CUBE_LEVELS[g6 as usize],
        CUBE_LEVELS[b6 as usize],
    );

    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let (gray_idx, gray) = if avg < 8 {
        (16, 0)
    } else if avg > 238 {
        (231, 255)
    } else {
        let idx = 232 + ((avg - 8) / 10);
        (idx, 8 + 10 * (idx - 232))
    };
    let gray_dist = dist2(r, g, b, gray, gray, gray);

    if gray_dist < cube_dist {
        gray_idx
    } else {
        cube_idx
    }
}

fn rgb_to_color16(r: u8, g: u8, b: u8) -> Color {
    const TABLE: [(Color, (u8, u8, u8)); 8] = [
        (Color::Black, (0, 0, 0)),
        (Color::DarkGrey, (128, 128, 128)),
        (Color::Grey, (192, 192, 192)),
        (Color::White, (255, 255, 255)),
        (Color::DarkGreen, (0, 128, 0)),
        (Color::Green, (0, 255, 0)),
        (Color::DarkCyan, (0, 128, 128)),
        (Color::Cyan, (0, 255, 255)),
    ];

    let mut best = Color::White;
    let mut best_d = i32::MAX;
    for (c, (cr, cg, cb)) in TABLE {
        let d = dist2(r, g, b, cr, cg, cb);
        if d < best_d {
            best_d = d;
            best = c;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_prefers_colorterm() {
        assert_eq!(detect_color_mode("truecolor", "xterm"), ColorMode::TrueColor);
        assert_eq!(detect_color_mode("24bit", ""), ColorMode::TrueColor);
        assert_eq!(detect_color_mode("", "xterm-256color"), ColorMode::Color256);
        assert_eq!(detect_color_mode("", "dumb"), ColorMode::Mono);
        assert_eq!(detect_color_mode("", "linux"), ColorMode::Color16);
    }

    #[test]
    fn tints_map_to_green_and_white() {
        let p = Palette::new(ColorMode::Color16);
        assert_eq!(p.pen(Tint::Base).fg, Some(Color::DarkGreen));
        assert_eq!(p.pen(Tint::Highlight).fg, Some(Color::White));

        let p = Palette::new(ColorMode::Color256);
        assert_eq!(p.base.fg, Some(Color::AnsiValue(34)));
        assert_eq!(p.highlight.fg, Some(Color::AnsiValue(231)));
    }

    #[test]
    fn mono_distinguishes_tints_by_weight_only() {
        let p = Palette::new(ColorMode::Mono);
        assert_eq!(p.base.fg, None);
        assert_eq!(p.highlight.fg, None);
        assert!(p.highlight.bold && !p.base.bold);
    }
}
