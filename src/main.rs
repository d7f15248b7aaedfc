mod app;
mod command;
mod config;
mod consts;
mod engine;
mod store;
mod ui;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::engine::{Difficulty, Session, TimerQueue};
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Options given on the command line
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    difficulty: Option<Difficulty>,
    log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Mode {
    Run(Arguments),
    Help,
    Version,
}

impl Mode {
    fn from_parser(mut parser: lexopt::Parser) -> Result<Mode, lexopt::Error> {
        use lexopt::prelude::*;
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Short('c') | Long("config") => args.config = Some(PathBuf::from(parser.value()?)),
                Short('d') | Long("difficulty") => {
                    args.difficulty = Some(parser.value()?.parse::<Difficulty>()?);
                }
                Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Short('h') | Long("help") => return Ok(Mode::Help),
                Short('V') | Long("version") => return Ok(Mode::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Mode::Run(args))
    }
}

const USAGE: &str = concat!(
    "Usage: gridsnake [<options>]\n",
    "\n",
    "Play snake in the terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <path>       Read configuration from the given file\n",
    "  -d, --difficulty <level>  Start at the given difficulty: easy, medium,\n",
    "                            hard, or nightmare\n",
    "      --log-file <path>     Write log messages to the given file\n",
    "  -h, --help                Display this help message and exit\n",
    "  -V, --version             Show the program version and exit\n",
);

fn main() -> ExitCode {
    match Mode::from_parser(lexopt::Parser::from_env()) {
        Ok(Mode::Run(args)) => match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => error_exit(&e),
        },
        Ok(Mode::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Mode::Version) => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprintln!("Run `gridsnake --help` for usage");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let config = match args.config {
        Some(ref path) => Config::load(path, false),
        None => Config::default_path().and_then(|path| Config::load(&path, true)),
    }
    .context("failed to load configuration")?;
    if let Some(path) = args.log_file.as_deref().or(config.files.log_file.as_deref()) {
        init_logging(path)?;
    }
    let difficulty = args.difficulty.unwrap_or(config.game.difficulty);
    log::info!(
        "Starting gridsnake {} on a {side}×{side} grid",
        env!("CARGO_PKG_VERSION"),
        side = config.game.grid.side()
    );
    let session = Session::new(
        config.game.grid,
        difficulty,
        TimerQueue::new(),
        config.files.high_score_store(),
        rand::rng(),
    );
    let terminal = ratatui::init();
    let r = crossterm::execute!(io::stdout(), EnableFocusChange)
        .and_then(|()| App::new(session).run(terminal));
    if let Err(e) = crossterm::execute!(io::stdout(), DisableFocusChange) {
        log::warn!("Failed to disable focus change reporting: {e}");
    }
    ratatui::restore();
    match r {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        r => r.context("terminal I/O failed"),
    }
}

/// Send log messages at `info` level and up (or as set by `RUST_LOG`) to the
/// given file
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logging")?;
    Ok(())
}

fn error_exit(e: &anyhow::Error) -> ExitCode {
    log::error!("{e:#}");
    eprintln!("gridsnake: {e:#}");
    ExitCode::FAILURE
}
