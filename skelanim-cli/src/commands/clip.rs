//! Animation clip command implementations

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;
use skelanim::{
    ActionPlayer, BoneFrameTransform, KeyFrame, ManualClock, Model, PlaybackOptions,
    SamplingOptions, TimestampMode,
};

use crate::utils::{
    add_table_row, create_table, format_percentage, load_action, save_action, transform_cells,
};

#[derive(Subcommand)]
pub enum ClipCommands {
    /// Display information about a clip
    Info {
        /// Path to a JSON clip file (defaults to the built-in walk clip)
        file: Option<PathBuf>,

        /// List every keyframe timestamp
        #[arg(short, long)]
        detailed: bool,
    },

    /// Sample a clip at a point in time
    Sample {
        /// Path to a JSON clip file (defaults to the built-in walk clip)
        file: Option<PathBuf>,

        /// Time in seconds
        #[arg(short, long)]
        time: f32,

        /// Stamp interpolated frames with the time rebuilt from the blend factor
        #[arg(long)]
        recomputed_timestamps: bool,

        /// Print the pose as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a clip with a simulated frame clock
    Simulate {
        /// Path to a JSON clip file (defaults to the built-in walk clip)
        file: Option<PathBuf>,

        /// Seconds between simulated frames
        #[arg(short, long, default_value = "0.1")]
        step: f32,

        /// Number of frames to simulate
        #[arg(short, long, default_value = "10")]
        frames: usize,

        /// Loop the clip instead of stopping at its end
        #[arg(short, long = "loop")]
        looping: bool,

        /// Playback speed multiplier
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        speed: f32,
    },

    /// Write a clip as JSON
    Export {
        /// Path to a JSON clip file (defaults to the built-in walk clip)
        file: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn execute(cmd: ClipCommands) -> Result<()> {
    match cmd {
        ClipCommands::Info { file, detailed } => handle_info(file, detailed),
        ClipCommands::Sample {
            file,
            time,
            recomputed_timestamps,
            json,
        } => handle_sample(file, time, recomputed_timestamps, json),
        ClipCommands::Simulate {
            file,
            step,
            frames,
            looping,
            speed,
        } => handle_simulate(file, step, frames, PlaybackOptions { speed, looping }),
        ClipCommands::Export { file, output } => {
            let action = load_action(file.as_deref())?;
            save_action(&action, output.as_deref())
        }
    }
}

fn handle_info(file: Option<PathBuf>, detailed: bool) -> Result<()> {
    let action = load_action(file.as_deref())?;

    println!("=== Clip Information ===");
    println!("Name:     {}", action.name());
    println!("Duration: {:.3}s", action.duration());
    println!("Tracks:   {}", action.tracks().len());

    let mut table = create_table(&["Bone ID", "Bone Name", "Positions", "Rotations", "Scales", "End"]);
    for track in action.tracks() {
        add_table_row(
            &mut table,
            vec![
                track.bone_id().to_string(),
                track.bone_name().to_string(),
                track.position_track().len().to_string(),
                track.rotation_track().len().to_string(),
                track.scale_track().len().to_string(),
                track.end_time().map_or_else(|| "-".to_string(), |t| format!("{t:.3}s")),
            ],
        );
    }
    println!();
    table.printstd();

    let times = action.keyframe_times();
    if detailed {
        println!("\n=== Keyframe Times ===");
        for time in &times {
            println!("{time:.4}");
        }
    } else {
        println!("\n{} distinct keyframe times", times.len());
    }

    Ok(())
}

/// JSON view of a sampled pose, bones sorted by id
#[derive(Serialize)]
struct PoseOutput<'a> {
    time: f32,
    bones: Vec<(&'a str, &'a BoneFrameTransform)>,
}

fn sorted_bones(keyframe: &KeyFrame) -> Vec<(&str, &BoneFrameTransform)> {
    let mut bones: Vec<_> = keyframe.iter().map(|(id, t)| (id.as_str(), t)).collect();
    bones.sort_by(|a, b| a.0.cmp(b.0));
    bones
}

fn handle_sample(file: Option<PathBuf>, time: f32, recomputed: bool, json: bool) -> Result<()> {
    let action = load_action(file.as_deref())?;
    let options = SamplingOptions {
        timestamp: if recomputed {
            TimestampMode::Recomputed
        } else {
            TimestampMode::Query
        },
        ..SamplingOptions::default()
    };

    let keyframe = action.sample_at_with(time, &options);
    let bones = sorted_bones(&keyframe);

    if json {
        let output = PoseOutput {
            time: keyframe.time,
            bones,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize pose")?
        );
        return Ok(());
    }

    println!("=== Pose of '{}' at {:.4}s ===", action.name(), keyframe.time);
    let mut table = create_table(&["Bone ID", "Position", "Rotation", "Scale"]);
    for (bone_id, transform) in bones {
        let [position, rotation, scale] = transform_cells(transform);
        add_table_row(&mut table, vec![bone_id.to_string(), position, rotation, scale]);
    }
    table.printstd();

    Ok(())
}

fn handle_simulate(
    file: Option<PathBuf>,
    step: f32,
    frames: usize,
    options: PlaybackOptions,
) -> Result<()> {
    anyhow::ensure!(
        step.is_finite() && step >= 0.0,
        "Frame step must be a non-negative number, got {step}"
    );

    let action = Arc::new(load_action(file.as_deref())?);
    let model = Model::new("Simulation").into_ref();
    let clock = ManualClock::new();

    let mut player = ActionPlayer::with_clock(clock.clone())
        .with_options(options)
        .context("Invalid --speed")?;
    player.set_action(&model, Arc::clone(&action));
    player.resume();

    println!(
        "=== Simulating '{}' ({:.3}s, {} frames of {step}s, speed {}) ===",
        action.name(),
        action.duration(),
        frames,
        options.speed
    );

    let mut table = create_table(&["Frame", "Time", "Progress", "State"]);
    for frame in 1..=frames {
        clock.advance_secs(step);
        player.update();
        add_table_row(
            &mut table,
            vec![
                frame.to_string(),
                format!("{:.4}", player.current_time()),
                format_percentage(player.progress()),
                format!("{:?}", player.state()),
            ],
        );
    }
    table.printstd();

    Ok(())
}
