//! Text commands typed at the prompt.
//!
//! The parser recognises five command shapes, case-insensitively, and turns
//! them into a [`Command`] carrying already-typed arguments:
//!
//! | Command | Shape           |
//! |---------|-----------------|
//! | create  | `C w h`         |
//! | line    | `L x1 y1 x2 y2` |
//! | rect    | `R x1 y1 x2 y2` |
//! | fill    | `B x y c`       |
//! | quit    | `Q`             |
//!
//! Geometry is not checked here; that is left to [`crate::engine`].

use regex::{Captures, Regex};
use thiserror::Error;

use crate::engine::{self, CanvasPos, CanvasStore, Grid};
use crate::error::DrawResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CreateCanvas { width: i32, height: i32 },
    DrawLine { start: CanvasPos, end: CanvasPos },
    DrawRectangle { top_left: CanvasPos, bottom_right: CanvasPos },
    Fill { seed: CanvasPos, color: char },
    Quit,
}

impl Command {
    /// Runs the command against `store`. `Quit` leaves the store untouched.
    pub fn apply(self, store: &mut CanvasStore) -> DrawResult<&Grid> {
        match self {
            Command::CreateCanvas { width, height } => engine::create(store, width, height),
            Command::DrawLine { start, end } => engine::line(store, start, end),
            Command::DrawRectangle {
                top_left,
                bottom_right,
            } => engine::rectangle(store, top_left, bottom_right),
            Command::Fill { seed, color } => engine::fill(store, seed, color),
            Command::Quit => Ok(store.grid()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Input Command is not valid, Please check Catalogue.")]
    Unrecognized(String),

    #[error("Number {0} is too large.")]
    NumberTooLarge(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Canvas,
    Line,
    Rectangle,
    BucketFill,
    Quit,
}

impl CommandKind {
    const ALL: [CommandKind; 5] = [
        CommandKind::Canvas,
        CommandKind::Line,
        CommandKind::Rectangle,
        CommandKind::BucketFill,
        CommandKind::Quit,
    ];

    fn pattern(&self) -> &'static str {
        match self {
            CommandKind::Canvas => r"^(?i:c)\s+([0-9]+)\s+([0-9]+)$",
            CommandKind::Line => r"^(?i:l)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)$",
            CommandKind::Rectangle => r"^(?i:r)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)$",
            CommandKind::BucketFill => r"^(?i:b)\s+([0-9]+)\s+([0-9]+)\s+([A-Za-z])$",
            CommandKind::Quit => r"^(?i:q)$",
        }
    }
}

pub struct CommandParser {
    patterns: Vec<(CommandKind, Regex)>,
}

impl CommandParser {
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = CommandKind::ALL
            .iter()
            .map(|kind| Regex::new(kind.pattern()).map(|re| (*kind, re)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_valid(&self, input: &str) -> bool {
        let input = input.trim();
        self.patterns.iter().any(|(_, re)| re.is_match(input))
    }

    pub fn parse(&self, input: &str) -> Result<Command, ParseError> {
        let input = input.trim();
        for (kind, re) in &self.patterns {
            if let Some(caps) = re.captures(input) {
                return Self::build(*kind, &caps);
            }
        }
        Err(ParseError::Unrecognized(input.to_string()))
    }

    fn build(kind: CommandKind, caps: &Captures<'_>) -> Result<Command, ParseError> {
        let command = match kind {
            CommandKind::Canvas => Command::CreateCanvas {
                width: number(caps, 1)?,
                height: number(caps, 2)?,
            },
            CommandKind::Line => Command::DrawLine {
                start: CanvasPos::new(number(caps, 1)?, number(caps, 2)?),
                end: CanvasPos::new(number(caps, 3)?, number(caps, 4)?),
            },
            CommandKind::Rectangle => Command::DrawRectangle {
                top_left: CanvasPos::new(number(caps, 1)?, number(caps, 2)?),
                bottom_right: CanvasPos::new(number(caps, 3)?, number(caps, 4)?),
            },
            CommandKind::BucketFill => Command::Fill {
                seed: CanvasPos::new(number(caps, 1)?, number(caps, 2)?),
                color: caps
                    .get(3)
                    .and_then(|m| m.as_str().chars().next())
                    .ok_or_else(|| ParseError::Unrecognized(caps[0].to_string()))?,
            },
            CommandKind::Quit => Command::Quit,
        };
        Ok(command)
    }
}

fn number(caps: &Captures<'_>, group: usize) -> Result<i32, ParseError> {
    let digits = caps
        .get(group)
        .map(|m| m.as_str())
        .ok_or_else(|| ParseError::Unrecognized(caps[0].to_string()))?;
    digits
        .parse()
        .map_err(|_| ParseError::NumberTooLarge(digits.to_string()))
}
