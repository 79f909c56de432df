use std::{path::PathBuf, process::ExitCode};

use bonepose::{
    bones::{
        Armature, BoneAttribute, BoneContainer, BoneTransformView, CharacterProfile, PosingSpace,
    },
    config::{PoseEdits, Settings},
};
use clap::Parser;
use glam::Vec3;
use tracing::{error, info};

#[derive(clap::Parser)]
struct Opts {
    /// Path to a settings file with editor defaults.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Path to a file of `EDIT` lines applied to the reference armature before any command.
    #[arg(long)]
    edits: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// List one attribute of every bone in the reference armature.
    List {
        #[arg(long)]
        attribute: Option<BoneAttribute>,

        #[arg(long)]
        space: Option<PosingSpace>,

        /// Only list bones that differ from the rest pose.
        #[arg(long)]
        edited: bool,
    },

    /// Edit one bone through a profile and apply it to the reference armature.
    Set {
        bone: String,

        #[arg(required = true, num_args = 3, allow_negative_numbers = true)]
        value: Vec<f32>,

        #[arg(long)]
        attribute: Option<BoneAttribute>,

        #[arg(long)]
        space: Option<PosingSpace>,

        /// Also apply the reflected value to the bone on the other side.
        #[arg(long)]
        mirror: bool,
    },
}

fn print_view(view: &BoneTransformView<'_>) {
    println!(
        "{:<16} {:<22} {:<10} {:<12} {}",
        view.code_name(),
        view.display_name,
        view.family,
        view.attribute(),
        view.value
    );
}

fn run(opts: Opts) -> Result<(), Box<dyn std::error::Error>> {
    let settings = match &opts.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let armature = Armature::reference()?;
    info!("Reference armature has {} bones", armature.len());

    if let Some(path) = &opts.edits {
        let profile = PoseEdits::load(path)?.to_profile("edits", settings.default_posing_space);
        let applied = armature.apply_profile(&profile);
        info!("Applied {applied} edited bones from {}", path.display());
    }

    match opts.command {
        Command::List {
            attribute,
            space,
            edited,
        } => {
            let attribute = attribute.unwrap_or(settings.default_attribute);
            let space = space.unwrap_or(settings.default_posing_space);

            for view in armature.bone_transform_values(attribute, space) {
                let is_edited = armature
                    .bone(view.code_name())
                    .is_some_and(|bone| bone.transform.is_edited());
                if !edited || is_edited {
                    print_view(&view);
                }
            }
        }

        Command::Set {
            bone,
            value,
            attribute,
            space,
            mirror,
        } => {
            let attribute = attribute.unwrap_or(settings.default_attribute);
            let space = space.unwrap_or(settings.default_posing_space);
            let mirror = mirror || settings.mirror_changes;

            if armature.index_of(&bone).is_none() {
                return Err(format!("Unknown bone: {bone}").into());
            }

            let profile = CharacterProfile::new("cli");
            let stored = armature
                .bone(&bone)
                .map(|bone| bone.transform)
                .unwrap_or_default();

            let mut view = BoneTransformView::from_raw(&profile, &bone, &stored, attribute, space);
            view.value = Vec3::from_slice(&value);
            view.push_changes(attribute, mirror);

            let applied = armature.apply_profile(&profile);
            info!("Applied {applied} bones");

            for view in armature.bone_transform_values(attribute, space) {
                if profile.transform(view.code_name()).is_some() {
                    print_view(&view);
                }
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    let opts = Opts::parse();

    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
