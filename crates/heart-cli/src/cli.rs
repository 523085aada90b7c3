//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use heart_core::Label;

/// Heart Hands - two-hand heart gesture recognition
#[derive(Parser, Debug)]
#[command(name = "heart")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect labeled samples into the dataset
    Collect {
        /// Read landmark frames from a recorded JSON-lines file instead of the live detector
        #[arg(long)]
        replay: Option<PathBuf>,

        /// Dataset file (overrides config)
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Print one line per frame without keyboard controls
        #[arg(long)]
        headless: bool,

        /// Confirm every auto-captured sample with this label
        #[arg(long, value_enum)]
        auto_label: Option<LabelArg>,

        /// Frame rate of the replay file, used to time auto-capture holds
        #[arg(long, default_value_t = 30.0)]
        fps: f64,
    },

    /// Train the classifier from the dataset
    Train {
        /// Dataset file (overrides config)
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },

    /// Run live detection
    Detect {
        /// Read landmark frames from a recorded JSON-lines file instead of the live detector
        #[arg(long)]
        replay: Option<PathBuf>,

        /// Print one line per frame without keyboard controls
        #[arg(long)]
        headless: bool,

        /// Decision threshold (overrides config)
        #[arg(short, long)]
        threshold: Option<f64>,
    },
}

/// Sample label on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelArg {
    Heart,
    NotHeart,
}

impl From<LabelArg> for Label {
    fn from(arg: LabelArg) -> Self {
        match arg {
            LabelArg::Heart => Label::Heart,
            LabelArg::NotHeart => Label::NotHeart,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
