use std::path::Path;

use glam::Vec3;
use tracing::info;

use crate::bones::{BoneAttribute, BoneTransformView, CharacterProfile, PosingSpace};

use super::{ConfigError, ConfigLines};

#[derive(Clone, Debug, PartialEq)]
pub struct BoneEdit {
    pub bone: String,
    pub attribute: BoneAttribute,
    pub value: Vec3,
    pub mirror: bool,
}

/// A list of bone edits, one `EDIT <bone> <attribute> <x> <y> <z> [mirror]` line each.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseEdits {
    pub edits: Vec<BoneEdit>,
}

impl PoseEdits {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let edits = Self::parse(&text)?;
        info!("Loaded {} edits from {}", edits.edits.len(), path.display());
        Ok(edits)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut edits = Vec::new();

        for line in ConfigLines::parse(text).iter() {
            if line.key != "EDIT" {
                return Err(ConfigError::UnknownKey {
                    line: line.line_number,
                    key: line.key.clone(),
                });
            }

            let mirror = match line.string(5) {
                None => false,
                Some(flag) if flag.eq_ignore_ascii_case("mirror") => true,
                Some(flag) => {
                    return Err(ConfigError::InvalidValue {
                        line: line.line_number,
                        key: line.key.clone(),
                        value: flag,
                    });
                }
            };

            edits.push(BoneEdit {
                bone: line.parse_param(0)?,
                attribute: line.parse_param(1)?,
                value: Vec3::new(
                    line.parse_param(2)?,
                    line.parse_param(3)?,
                    line.parse_param(4)?,
                ),
                mirror,
            });
        }

        Ok(Self { edits })
    }

    /// Push every edit, in order, into a new profile.
    pub fn to_profile(&self, name: impl Into<String>, space: PosingSpace) -> CharacterProfile {
        let profile = CharacterProfile::new(name);

        for edit in &self.edits {
            let stored = profile.transform(&edit.bone).unwrap_or_default();
            let mut view =
                BoneTransformView::from_raw(&profile, &edit.bone, &stored, edit.attribute, space);
            view.value = edit.value;
            view.push_changes(edit.attribute, edit.mirror);
        }

        profile
    }
}
