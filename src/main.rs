use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;

use arena_snake::config::{ASCII_GLYPHS, DEFAULT_GRID, Difficulty, EMOJI_GLYPHS, GlyphSet};
use arena_snake::error::GameError;
use arena_snake::game::{GameSession, SessionStatus};
use arena_snake::input::{CommandSource, InputMode, TerminalInput};
use arena_snake::terminal_runtime::TerminalSession;
use clap::Parser;
use log::{LevelFilter, error, info};
use simplelog::{Config, WriteLogger};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Skip the menu and start at this difficulty (easy, medium, hard).
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Seed the random generator for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Draw with ASCII characters instead of emoji.
    #[arg(long)]
    ascii: bool,

    /// Write a log of game events to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(error) = init_logging(path) {
            eprintln!("Failed to open log file {}: {error}", path.display());
            return ExitCode::FAILURE;
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("fatal: {error}");
            eprintln!("arena-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), file)
        .map_err(io::Error::other)
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let glyphs: &GlyphSet = if cli.ascii {
        &ASCII_GLYPHS
    } else {
        &EMOJI_GLYPHS
    };
    let mut session = match cli.seed {
        Some(seed) => GameSession::new_with_seed(DEFAULT_GRID, seed),
        None => GameSession::new(DEFAULT_GRID),
    };
    if let Some(difficulty) = cli.difficulty {
        session.start(difficulty);
    }

    info!("arena-snake starting");
    let mut terminal = TerminalSession::enter()?;
    let mut input = TerminalInput;

    game_loop(&mut session, &mut terminal, &mut input, glyphs)?;

    info!("exiting with high score {}", session.stats.high_score);
    Ok(())
}

fn game_loop(
    session: &mut GameSession,
    terminal: &mut TerminalSession,
    input: &mut impl CommandSource,
    glyphs: &GlyphSet,
) -> Result<(), AppError> {
    loop {
        match session.status() {
            SessionStatus::Terminated => return Ok(()),
            SessionStatus::Playing => {
                let command = input.next_command(InputMode::NonBlocking)?;
                session.apply_command(command);
                session.tick()?;
                terminal.draw(session, glyphs)?;
                thread::sleep(session.tick_interval());
            }
            SessionStatus::Menu | SessionStatus::Paused | SessionStatus::GameOver => {
                terminal.draw(session, glyphs)?;
                let command = input.next_command(InputMode::Blocking)?;
                session.apply_command(command);
            }
        }
    }
}
