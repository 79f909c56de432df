use std::path::Path;

use tracing::info;

use crate::bones::{BoneAttribute, PosingSpace};

use super::{ConfigError, ConfigLines};

/// Editor defaults used when a caller does not pick an attribute, space or mirror mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub default_attribute: BoneAttribute,
    pub default_posing_space: PosingSpace,
    pub mirror_changes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_attribute: BoneAttribute::Rotation,
            default_posing_space: PosingSpace::Local,
            mirror_changes: false,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::parse(&text)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from config-line text. Keys that are not present keep their defaults.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        for line in ConfigLines::parse(text).iter() {
            match line.key.as_str() {
                "DEFAULT_ATTRIBUTE" => settings.default_attribute = line.parse_param(0)?,
                "DEFAULT_POSING_SPACE" => settings.default_posing_space = line.parse_param(0)?,
                "MIRROR_CHANGES" => settings.mirror_changes = line.parse_param(0)?,
                _ => {
                    return Err(ConfigError::UnknownKey {
                        line: line.line_number,
                        key: line.key.clone(),
                    });
                }
            }
        }

        Ok(settings)
    }
}
