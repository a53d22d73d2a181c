#![forbid(unsafe_code)]

//! Command-line and environment configuration.
//!
//! Every option can also be set through a `SORTVIZ_*` environment variable;
//! an explicit flag wins over the environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::builder::BoolishValueParser;
use sortviz_engine::{SessionConfig, SlotLayout, Speed, Value};
use sortviz_runtime::ProgramConfig;

use crate::error::{Result, SortvizError};

/// Most bars a session may hold.
pub const MAX_BARS: usize = 512;

/// Largest bar value accepted.
pub const MAX_VALUE: Value = 10_000;

const KEYBINDINGS: &str = "\
KEYBINDINGS:
    s               Shuffle (idle only)
    i / e / b / m   Insertion / Selection / Bubble / Merge sort (idle only)
    Left / Right    Speed -1 / +1 (also - and +)
    Down / Up       Speed -10 / +10
    ?               Toggle help overlay
    q / Esc / Ctrl+C  Quit

Set SORTVIZ_LOG (e.g. `debug`) together with --log-file to capture traces.";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "sortviz",
    about = "Watch sorting algorithms rearrange bars, one step per tick",
    version,
    after_help = KEYBINDINGS
)]
pub struct Cli {
    /// Number of bars per shuffle.
    #[arg(long, env = "SORTVIZ_BARS", default_value_t = 60)]
    pub bars: usize,

    /// Animation speed, 1 (slowest) to 100 (fastest).
    #[arg(
        long,
        env = "SORTVIZ_SPEED",
        default_value_t = 50,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub speed: u32,

    /// Seed for reproducible shuffles.
    #[arg(long, env = "SORTVIZ_SEED")]
    pub seed: Option<u64>,

    /// Smallest bar value.
    #[arg(long, env = "SORTVIZ_MIN_VALUE", default_value_t = 2)]
    pub min_value: Value,

    /// Largest bar value.
    #[arg(long, env = "SORTVIZ_MAX_VALUE", default_value_t = 64)]
    pub max_value: Value,

    /// Draw on the main screen instead of the alternate screen.
    #[arg(long, env = "SORTVIZ_NO_ALT_SCREEN", value_parser = BoolishValueParser::new())]
    pub no_alt_screen: bool,

    /// Quit automatically after this many milliseconds.
    #[arg(long, env = "SORTVIZ_EXIT_AFTER_MS")]
    pub exit_after_ms: Option<u64>,

    /// Write tracing output to this file.
    #[arg(long, env = "SORTVIZ_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Validated configuration derived from [`Cli`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub session: SessionConfig,
    pub program: ProgramConfig,
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Check cross-field constraints and build the runtime settings.
    pub fn into_settings(self) -> Result<Settings> {
        if self.bars > MAX_BARS {
            return Err(SortvizError::invalid(format!(
                "--bars must be at most {MAX_BARS}, got {}",
                self.bars
            )));
        }
        if self.max_value == 0 || self.max_value > MAX_VALUE {
            return Err(SortvizError::invalid(format!(
                "--max-value must be between 1 and {MAX_VALUE}, got {}",
                self.max_value
            )));
        }
        if self.min_value > self.max_value {
            return Err(SortvizError::invalid(format!(
                "--min-value ({}) must not exceed --max-value ({})",
                self.min_value, self.max_value
            )));
        }

        let session = SessionConfig {
            bar_count: self.bars,
            value_range: self.min_value..=self.max_value,
            layout: layout_for(self.max_value),
            seed: self.seed,
            speed: Speed::new(self.speed),
        };

        let mut program = ProgramConfig::fullscreen();
        program.alternate_screen = !self.no_alt_screen;
        if let Some(ms) = self.exit_after_ms.filter(|ms| *ms > 0) {
            program = program.with_exit_after(Duration::from_millis(ms));
        }

        Ok(Settings {
            session,
            program,
            log_file: self.log_file,
        })
    }
}

/// Canvas layout: one unit wide bars, one unit apart, standing on `max_value`.
///
/// Standing on `max_value` keeps every bar top at or below `y = 0`.
pub fn layout_for(max_value: Value) -> SlotLayout {
    SlotLayout::new(0, 2, 1, max_value as i32)
}
