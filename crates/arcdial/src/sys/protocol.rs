//! Line protocol spoken on the control socket and in replay scripts.
//!
//! ```text
//! down 330 30          pointer press at surface-local (330, 30)
//! move 630 330
//! up
//! touch start 370 90   touch events carry page coordinates
//! resize 800 600 [left top]
//! values
//! reload
//! ```

use crate::events::{AppEvent, InputEvent, Phase, PointerEvent, TouchEvent};
use ringgeom::SurfaceBounds;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{0}' needs a phase")]
    MissingPhase(String),
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("'{command}' does not take {count} argument(s)")]
    WrongArity { command: String, count: usize },
}

/// Parses one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<AppEvent>, ProtocolError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "values" => {
            expect_no_args(command, words)?;
            AppEvent::Values
        }
        "reload" => {
            expect_no_args(command, words)?;
            AppEvent::ConfigReload
        }
        "resize" => match numbers(words)?.as_slice() {
            &[width, height] => AppEvent::Resize(SurfaceBounds::sized(width, height)),
            &[width, height, left, top] => {
                AppEvent::Resize(SurfaceBounds::new(left, top, width, height))
            }
            args => return Err(arity(command, args.len())),
        },
        "touch" => {
            let phase_word = words
                .next()
                .ok_or_else(|| ProtocolError::MissingPhase(command.to_string()))?;
            let phase = parse_touch_phase(phase_word)?;
            let (x, y) = coordinates(phase_word, phase, words)?;
            AppEvent::Input(InputEvent::Touch(TouchEvent::new(phase, x, y)))
        }
        _ => {
            let phase = parse_phase(command)?;
            let (x, y) = coordinates(command, phase, words)?;
            AppEvent::Input(InputEvent::Pointer(PointerEvent::new(phase, x, y)))
        }
    };
    Ok(Some(event))
}

fn parse_phase(word: &str) -> Result<Phase, ProtocolError> {
    Phase::from_str(word).map_err(|_| ProtocolError::UnknownCommand(word.to_string()))
}

/// Touch phases also take the short `start`/`end`/`cancel` forms.
fn parse_touch_phase(word: &str) -> Result<Phase, ProtocolError> {
    match word.to_ascii_lowercase().as_str() {
        "start" => Ok(Phase::Press),
        "end" | "cancel" => Ok(Phase::Release),
        _ => parse_phase(word),
    }
}

/// Releases may leave out the position, nothing reads it.
fn coordinates<'a>(
    command: &str,
    phase: Phase,
    words: impl Iterator<Item = &'a str>,
) -> Result<(f64, f64), ProtocolError> {
    match (phase, numbers(words)?.as_slice()) {
        (_, &[x, y]) => Ok((x, y)),
        (Phase::Release, &[]) => Ok((0.0, 0.0)),
        (_, args) => Err(arity(command, args.len())),
    }
}

fn numbers<'a>(words: impl Iterator<Item = &'a str>) -> Result<Vec<f64>, ProtocolError> {
    words
        .map(|w| {
            w.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| ProtocolError::InvalidNumber(w.to_string()))
        })
        .collect()
}

fn expect_no_args<'a>(
    command: &str,
    mut words: impl Iterator<Item = &'a str>,
) -> Result<(), ProtocolError> {
    match words.next() {
        None => Ok(()),
        Some(_) => Err(arity(command, 1 + words.count())),
    }
}

fn arity(command: &str, count: usize) -> ProtocolError {
    ProtocolError::WrongArity {
        command: command.to_string(),
        count,
    }
}
