use std::io::{self, BufRead, Write};

use log::{debug, info, warn};
use thiserror::Error;

use command::{Command, CommandParser, ParseError};
use config::Config;
use engine::{CanvasPos, CanvasStore, Grid};
use error::DrawResult;
use style::{Palette, RenderMode};

pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod style;

/// Everything a drawing session owns: the canvas and the quit flag.
pub struct State {
    store: CanvasStore,
    quit: bool,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub fn new() -> Self {
        Self {
            store: CanvasStore::new(),
            quit: false,
        }
    }

    pub fn exit(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn grid(&self) -> &Grid {
        self.store.grid()
    }

    pub fn create_canvas(&mut self, width: i32, height: i32) -> DrawResult<&Grid> {
        engine::create(&mut self.store, width, height)
    }

    pub fn line(&mut self, start: CanvasPos, end: CanvasPos) -> DrawResult<&Grid> {
        engine::line(&mut self.store, start, end)
    }

    pub fn rectangle(&mut self, top_left: CanvasPos, bottom_right: CanvasPos) -> DrawResult<&Grid> {
        engine::rectangle(&mut self.store, top_left, bottom_right)
    }

    pub fn fill(&mut self, seed: CanvasPos, color: char) -> DrawResult<&Grid> {
        engine::fill(&mut self.store, seed, color)
    }

    pub fn execute(&mut self, command: Command) -> DrawResult<&Grid> {
        if command == Command::Quit {
            self.exit();
        }
        command.apply(&mut self.store)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid command pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type AppResult = Result<(), AppError>;

/// The interactive read-eval loop.
///
/// Reads one command per line, applies it and prints the resulting canvas.
/// Bad input only produces a message on the error stream; the session ends on
/// `Q` or at end of input.
pub struct App {
    state: State,
    parser: CommandParser,
    config: Config,
    mode: RenderMode,
}

impl App {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let mode = if config.display.color {
            RenderMode::Colored(Palette::default())
        } else {
            RenderMode::Plain
        };
        Ok(Self {
            state: State::new(),
            parser: CommandParser::new()?,
            config,
            mode,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn run<R, W, E>(&mut self, input: R, out: &mut W, err: &mut E) -> AppResult
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        info!("session started");
        if self.config.display.catalogue {
            style::render_catalogue(out, self.mode)?;
        }

        let mut lines = input.lines();
        while !self.state.should_quit() {
            write!(out, "{}", self.config.display.prompt)?;
            out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                debug!("end of input");
                break;
            };
            self.handle_line(&line, out, err)?;
        }
        info!("session ended");
        Ok(())
    }

    fn handle_line<W, E>(&mut self, line: &str, out: &mut W, err: &mut E) -> AppResult
    where
        W: Write,
        E: Write,
    {
        if !self.parser.is_valid(line) {
            warn!("rejected input {line:?}");
            writeln!(err, "{}", ParseError::Unrecognized(line.trim().to_string()))?;
            style::render_catalogue(err, RenderMode::Plain)?;
            return Ok(());
        }

        // The shape matched, so only an out-of-range number can fail here.
        let command = match self.parser.parse(line) {
            Ok(command) => command,
            Err(e) => {
                warn!("rejected input {line:?}: {e}");
                writeln!(err, "{e}")?;
                return Ok(());
            }
        };

        if let Command::CreateCanvas { width, height } = command {
            let limits = self.config.canvas;
            if width > limits.max_width || height > limits.max_height {
                warn!("rejected {width}x{height} canvas");
                writeln!(
                    err,
                    "Canvas must be at most {} wide and {} high.",
                    limits.max_width, limits.max_height
                )?;
                return Ok(());
            }
        }

        match self.state.execute(command) {
            Ok(_) if command == Command::Quit => {
                writeln!(out, "Shutting down the program.. Bye!")?;
            }
            Ok(grid) => style::render_grid(out, grid, self.mode)?,
            Err(e) => {
                warn!("{command:?} failed: {e}");
                writeln!(err, "{e}")?;
            }
        }
        Ok(())
    }
}
