// Copyright (c) 2026 rezky_nightky

use std::io;

use thiserror::Error;

/// Conditions that stop the program before the first frame.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("stdout is not a terminal, nothing to rain on :/")]
    NotATerminal,
    #[error("couldn't set up the terminal screen :( ({0})")]
    Surface(#[source] io::Error),
}

/// A frame that could not be shown. The loop carries on with the next one.
#[derive(Debug, Error)]
#[error("couldn't write frame to the terminal: {0}")]
pub struct FrameError(#[from] pub io::Error);

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_messages_are_short_and_specific() {
        assert_eq!(
            SetupError::NotATerminal.to_string(),
            "stdout is not a terminal, nothing to rain on :/"
        );
        let e = RunError::from(SetupError::Surface(io::Error::other("no tty")));
        assert_eq!(e.to_string(), "couldn't set up the terminal screen :( (no tty)");
    }

    #[test]
    fn frame_error_wraps_io() {
        let e: FrameError = io::Error::other("broken pipe").into();
        assert!(e.to_string().ends_with("broken pipe"));
    }
}
