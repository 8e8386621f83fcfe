mod app;
mod audio;
mod cli;
mod command;
mod config;
mod consts;
mod difficulty;
mod game;
mod highscores;
mod logging;
mod menu;
mod util;
use crate::app::App;
use crate::audio::Audio;
use crate::cli::{Arguments, Invocation, USAGE};
use crate::config::Config;
use crate::util::Globals;
use anyhow::Context;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    let invocation = match Invocation::from_parser(lexopt::Parser::from_env()) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("powersnake: {e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    match invocation {
        Invocation::Help => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Invocation::Version => {
            println!("powersnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Invocation::Run(args) => exit(run(args)),
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let config = match args.config {
        Some(ref path) => Config::load(path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load(&path, true)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?,
            Err(_) => Config::default(),
        },
    };
    let log_file = args
        .log_file
        .or_else(|| std::env::var_os(logging::FILE_ENV_VAR).map(PathBuf::from))
        .or_else(|| config.log.file.clone());
    if let Some(path) = log_file {
        logging::init(&path)
            .with_context(|| format!("failed to set up logging to {}", path.display()))?;
    }
    let globals = Globals {
        difficulty: args.difficulty.unwrap_or(config.difficulty),
        audio: Audio::new(config.sound),
        scores: config.score_file(),
    };
    info!(difficulty = %globals.difficulty, sound = config.sound, "Starting powersnake");
    let terminal = ratatui::init();
    let r = App::new(globals).run(terminal);
    ratatui::restore();
    r?;
    info!("Exiting");
    Ok(())
}

fn exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("powersnake: {e:#}");
            ExitCode::from(2)
        }
    }
}
