//! CLI Command Implementations

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use log::{info, warn};
use walkdir::WalkDir;

use crate::cli::KnobArgs;
use crate::config::{RenderConfig, Settings};
use crate::engine::render_file;
use crate::host::CAFEMODE_DESCRIPTOR;

/// Resolve effective settings: file (or enabled defaults), then overrides
pub fn resolve_settings(knobs: &KnobArgs) -> anyhow::Result<Settings> {
    let mut settings = match &knobs.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings {
            enabled: true,
            ..Settings::default()
        },
    };

    if let Some(intensity) = knobs.intensity {
        settings.intensity = intensity;
    }
    if let Some(width) = knobs.width {
        settings.spatial_width = width;
    }
    if knobs.bypass {
        settings.enabled = false;
    }
    Ok(settings.sanitized())
}

/// Render a single file.
pub fn render(input: &Path, output: &Path, knobs: &KnobArgs) -> anyhow::Result<()> {
    let settings = resolve_settings(knobs)?;
    let config = RenderConfig::with_block_frames(knobs.block_size);

    render_file(input, output, &settings, &config)
        .with_context(|| format!("rendering {}", input.display()))?;

    println!("Rendered: {} -> {}", input.display(), output.display());
    Ok(())
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

/// Collect WAV files under `dir`, sorted for stable output
pub fn find_wav_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_wav(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Render every WAV file below `input_dir` into `output_dir`.
///
/// Returns the number of files rendered. A failing file is reported and
/// skipped; the batch fails only if nothing could be rendered.
pub fn batch(input_dir: &Path, output_dir: &Path, knobs: &KnobArgs) -> anyhow::Result<usize> {
    if !input_dir.is_dir() {
        bail!("{} is not a directory", input_dir.display());
    }

    let settings = resolve_settings(knobs)?;
    let config = RenderConfig::with_block_frames(knobs.block_size);
    let files = find_wav_files(input_dir);
    info!("Batch rendering {} file(s) from {}", files.len(), input_dir.display());

    let mut rendered = 0;
    for input in &files {
        let relative = input.strip_prefix(input_dir).unwrap_or(input);
        let output = output_dir.join(relative);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        match render_file(input, &output, &settings, &config) {
            Ok(()) => {
                println!("Rendered: {}", relative.display());
                rendered += 1;
            }
            Err(e) => {
                warn!("{}: {} ({})", input.display(), e, e.recovery_hint());
                eprintln!("Failed: {}: {}", relative.display(), e);
            }
        }
    }

    if rendered == 0 && !files.is_empty() {
        bail!("no files could be rendered");
    }
    println!("{} of {} file(s) rendered", rendered, files.len());
    Ok(rendered)
}

/// Print the effect descriptor.
pub fn describe(json: bool) -> anyhow::Result<()> {
    let d = &CAFEMODE_DESCRIPTOR;
    if json {
        println!("{}", serde_json::to_string_pretty(d)?);
        return Ok(());
    }

    println!("Name:        {}", d.name);
    println!("Implementor: {}", d.implementor);
    println!("Type UUID:   {}", d.type_uuid);
    println!("UUID:        {}", d.uuid);
    println!("API version: {}.{}", d.api_version >> 16, d.api_version & 0xffff);
    println!("Flags:       {:#05b}", d.flags.bits());
    Ok(())
}

/// Write a default settings file.
pub fn init_settings(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Settings::default()
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Settings written: {}", path.display());
    Ok(())
}
