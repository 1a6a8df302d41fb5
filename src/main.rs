//! CafeMode CLI - offline stereo enhancement
//!
//! Command-line interface for rendering WAV files through the CafeMode effect.

use clap::Parser;
use env_logger::Env;
use log::debug;

use cafemode::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("CafeMode v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("CafeMode v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Render {
            input,
            output,
            knobs,
        } => commands::render(&input, &output, &knobs),
        Commands::Batch {
            input_dir,
            output_dir,
            knobs,
        } => commands::batch(&input_dir, &output_dir, &knobs).map(|_| ()),
        Commands::Describe { json } => commands::describe(json),
        Commands::InitSettings { path, force } => commands::init_settings(&path, force),
    }
}
