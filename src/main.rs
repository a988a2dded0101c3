// Copyright (c) 2026 rezky_nightky

mod app;
mod banner;
mod cell;
mod charset;
mod config;
mod droplet;
mod error;
mod field;
mod grid;
mod input;
mod palette;
mod runtime;
mod surface;
mod terminal;

use std::io::{stdout, IsTerminal, Write};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{cursor, terminal as term, ExecutableCommand};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::app::Rain;
use crate::charset::CharacterSet;
use crate::config::{credit_line, Args, CREDIT_DELAY_SECS, USAGE_HINT};
use crate::error::{RunError, SetupError};
use crate::field::DropField;
use crate::input::TerminalInput;
use crate::palette::{detect_color_mode_from_env, Palette};
use crate::terminal::{restore_terminal_best_effort, Terminal};

fn build_info() -> &'static str {
    env!("GLYPHFALL_BUILD")
}

fn install_restore_handlers() {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }
}

fn intro(skip_delay: bool) -> std::io::Result<()> {
    let mut out = stdout();
    out.execute(term::Clear(term::ClearType::All))?;
    out.execute(cursor::MoveTo(0, 0))?;
    writeln!(out, "{}", credit_line())?;
    writeln!(out, "{}", USAGE_HINT)?;
    out.flush()?;
    if !skip_delay {
        thread::sleep(Duration::from_secs(CREDIT_DELAY_SECS));
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), RunError> {
    if !stdout().is_terminal() {
        return Err(SetupError::NotATerminal.into());
    }

    intro(args.no_intro)?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let field = DropField::new(CharacterSet::standard(), rng);

    let color_mode = detect_color_mode_from_env();
    info!("color mode {:?}", color_mode);
    let surface = Terminal::new(Palette::new(color_mode)).map_err(SetupError::Surface)?;
    let input = TerminalInput::new(surface.reports_key_release());

    Rain::new(surface, input, field, Instant::now())?.run()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        let sha = env!("GLYPHFALL_GIT_SHA");
        if !sha.is_empty() {
            println!("Commit: {}", sha);
        }
        println!("Copyright: (c) 2026 {}", env!("CARGO_PKG_AUTHORS"));
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return ExitCode::SUCCESS;
    }

    install_restore_handlers();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
