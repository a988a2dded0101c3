// Copyright (c) 2026 rezky_nightky

use clap::Parser;

pub const CREDIT_DELAY_SECS: u64 = 3;
pub const USAGE_HINT: &str = "Press [ENTER] to toggle windowed/fullscreen mode and [SPACE] to exit!";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "glyphfall",
    about = "Digital rain behind a banner. ENTER toggles fullscreen, SPACE exits.",
    version,
    disable_version_flag = true
)]
pub struct Args {
    #[arg(
        long = "seed",
        help_heading = "GENERAL",
        help = "Seed the random source for a reproducible rain pattern"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "no-intro",
        help_heading = "GENERAL",
        help = "Skip the credit screen and start raining right away"
    )]
    pub no_intro: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

pub fn credit_line() -> String {
    format!("{} by {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_AUTHORS"))
}
