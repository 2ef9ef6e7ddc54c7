use std::fs::File;
use std::panic;
use std::path::{Path, PathBuf};

use clap::Parser;
use factory_snake::config::THEME_CLASSIC;
use factory_snake::error::AppError;
use factory_snake::game::GameState;
use factory_snake::game_loop;
use factory_snake::input::KeyboardInput;
use factory_snake::terminal_runtime::{restore_terminal, TerminalSession};
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Parser)]
#[command(version, about = "Snake with several foods on the field at once")]
struct Cli {
    /// Seed for food placement and effects; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Write a log to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log verbosity when `--log-file` is given.
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level)?;
    }

    install_panic_hook();

    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(seed),
        None => GameState::new(),
    };
    log::info!("starting factory-snake (seed: {:?})", cli.seed);

    let mut session = TerminalSession::enter(&THEME_CLASSIC)?;
    let mut input = KeyboardInput::new();
    game_loop::run(&mut state, &mut input, &mut session)?;

    log::info!("exiting with score {}", state.score);
    Ok(())
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
    }));
}
