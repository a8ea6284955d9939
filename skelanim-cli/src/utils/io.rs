//! Clip loading and saving

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use skelanim::SkeletalAction;

use crate::demo;

/// Load a clip from a JSON file, or the built-in walk clip when no file is given
pub fn load_action(file: Option<&Path>) -> Result<SkeletalAction> {
    let Some(path) = file else {
        log::info!("No clip file given, using the built-in walk clip");
        return Ok(demo::walk_action());
    };

    let reader = File::open(path)
        .map(BufReader::new)
        .with_context(|| format!("Failed to open clip file {}", path.display()))?;
    let action: SkeletalAction = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse clip file {}", path.display()))?;

    if !action.duration().is_finite() || action.duration() < 0.0 {
        bail!(
            "Clip '{}' has invalid duration {}",
            action.name(),
            action.duration()
        );
    }

    log::info!(
        "Loaded clip '{}' with {} tracks from {}",
        action.name(),
        action.tracks().len(),
        path.display()
    );
    Ok(action)
}

/// Write a clip as pretty JSON to a file, or stdout when no path is given
pub fn save_action(action: &SkeletalAction, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, action)?;
            writer.flush()?;
            println!("Wrote clip '{}' to {}", action.name(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, action)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}
