//! CLI Module
//!
//! Command-line interface for offline rendering with the CafeMode enhancer.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_BLOCK_FRAMES;

/// CafeMode - stereo enhancement and Haas widening for WAV files
#[derive(Parser, Debug)]
#[command(name = "cafemode")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Knob overrides shared by the render commands
#[derive(clap::Args, Debug, Clone)]
pub struct KnobArgs {
    /// Settings JSON file (see `init-settings`)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Intensity override, 0-1
    #[arg(long)]
    pub intensity: Option<f32>,

    /// Spatial width override, 0-1
    #[arg(long)]
    pub width: Option<f32>,

    /// Render with the effect disabled
    #[arg(long)]
    pub bypass: bool,

    /// Frames per processing block
    #[arg(long, default_value_t = DEFAULT_BLOCK_FRAMES)]
    pub block_size: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a single WAV file
    #[command(name = "render")]
    Render {
        /// Input WAV file (mono or stereo)
        #[arg(short, long)]
        input: PathBuf,

        /// Output WAV file (32-bit float stereo)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        knobs: KnobArgs,
    },

    /// Render every WAV file under a directory
    #[command(name = "batch")]
    Batch {
        /// Directory searched recursively for .wav files
        #[arg(long)]
        input_dir: PathBuf,

        /// Destination directory; relative layout is preserved
        #[arg(long)]
        output_dir: PathBuf,

        #[command(flatten)]
        knobs: KnobArgs,
    },

    /// Print the effect descriptor
    #[command(name = "describe")]
    Describe {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write a settings file with default values
    #[command(name = "init-settings")]
    InitSettings {
        /// Path of the settings file
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
