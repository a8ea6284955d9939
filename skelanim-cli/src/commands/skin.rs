//! Skinning matrix command implementations

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use skelanim::{
    ActionPlayer, BoneMatrixGenerator, InverseBindMatrixGenerator, ManualClock, UniformGenerator,
};

use crate::demo;
use crate::utils::{format_matrix, load_action};

#[derive(Subcommand)]
pub enum SkinCommands {
    /// Print the skinning matrices of the demo rig posed by a clip
    Matrices {
        /// Path to a JSON clip file (defaults to the built-in walk clip)
        file: Option<PathBuf>,

        /// Clip time in seconds to pose the rig at
        #[arg(short, long, default_value = "0.0")]
        time: f32,

        /// Print inverse bind matrices instead of bone matrices
        #[arg(short, long)]
        inverse: bool,

        /// Print the raw float buffer as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn execute(cmd: SkinCommands) -> Result<()> {
    match cmd {
        SkinCommands::Matrices {
            file,
            time,
            inverse,
            json,
        } => handle_matrices(file, time, inverse, json),
    }
}

fn handle_matrices(file: Option<PathBuf>, time: f32, inverse: bool, json: bool) -> Result<()> {
    let action = Arc::new(load_action(file.as_deref())?);
    let model = demo::demo_model()
        .context("Failed to build the demo rig")?
        .into_ref();

    let mut player = ActionPlayer::with_clock(ManualClock::new());
    player.set_action(&model, action);
    player.seek(time);
    let keyframe = player
        .current_key_frame()
        .context("No clip bound to the demo rig")?;
    log::debug!("Posed demo rig at {:.4}s with {} bones", keyframe.time, keyframe.len());

    let model = model.borrow();
    let (label, buffer) = if inverse {
        ("Inverse bind matrices", InverseBindMatrixGenerator.compute(&model)?)
    } else {
        ("Bone matrices", BoneMatrixGenerator.compute(&model)?)
    };

    if json {
        println!("{}", serde_json::to_string(buffer.as_slice())?);
        return Ok(());
    }

    let order: Vec<String> = match (&model.skeleton, &model.skinning) {
        (Some(_), Some(skinning)) if inverse => skinning.bone_ids.clone(),
        (Some(skeleton), _) => {
            let mut bones: Vec<_> = skeleton.bones().iter().collect();
            bones.sort_by_key(|bone| bone.idx);
            bones.into_iter().map(|bone| bone.id.clone()).collect()
        }
        _ => Vec::new(),
    };

    println!("=== {label} at {:.4}s ({} bones) ===", player.current_time(), buffer.len());
    for (slot, matrix) in buffer.matrices().enumerate() {
        let bone_id = order.get(slot).map_or("?", String::as_str);
        println!("\n[{slot}] {bone_id}");
        println!("{}", format_matrix(matrix));
    }

    Ok(())
}
