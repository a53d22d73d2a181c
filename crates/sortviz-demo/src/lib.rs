#![forbid(unsafe_code)]

//! sortviz: a terminal sorting visualizer.
//!
//! # Running
//!
//! ```sh
//! cargo run -p sortviz-demo -- --bars 60 --speed 80
//! ```
//!
//! Press `i`, `e`, `b`, or `m` to start insertion, selection, bubble, or
//! merge sort; `s` reshuffles. See `sortviz --help` for every option.

pub mod app;
pub mod bars_view;
pub mod cli;
pub mod error;
pub mod logging;
pub mod theme;

use clap::Parser;
use sortviz_runtime::Program;

use crate::app::SortvizApp;
use crate::cli::Cli;
use crate::error::Result;

pub fn run_from_env() -> Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<()> {
    let settings = cli.into_settings()?;
    logging::init(settings.log_file.as_deref())?;
    tracing::info!(
        bars = settings.session.bar_count,
        speed = settings.session.speed.get(),
        seed = ?settings.session.seed,
        "starting sortviz"
    );

    let app = SortvizApp::new(settings.session);
    let mut program = Program::with_config(app, settings.program)?;
    program.run()?;

    tracing::info!("sortviz exited");
    Ok(())
}
