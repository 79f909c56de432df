//! Human-facing metadata for bone code names.
//!
//! Lookups never fail. A code name that is not in the table gets its own code name as display
//! name and [BoneFamily::Unknown] as family.

use std::sync::LazyLock;

use ahash::HashMap;
use strum::{Display, EnumIter, EnumString};
use tracing::warn;

use crate::config::{ConfigLine, ConfigLines};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum BoneFamily {
    Root,
    Spine,
    Hair,
    Face,
    Ears,
    Chest,
    Arms,
    Hands,
    Tail,
    Groin,
    Legs,
    Feet,
    Earrings,
    Cape,
    Armor,
    Skirt,
    Equipment,
    #[default]
    Unknown,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoneRecord {
    pub code_name: String,
    pub display_name: String,
    pub family: BoneFamily,
    pub parent: Option<String>,
}

#[derive(Default)]
struct BoneRegistry {
    records: Vec<BoneRecord>,
    by_code_name: HashMap<String, usize>,
}

impl BoneRegistry {
    fn parse(text: &str) -> Self {
        let mut registry = Self::default();

        for line in ConfigLines::parse(text).iter() {
            match line.key.as_str() {
                "BONE" => match Self::parse_record(line) {
                    Some(record) if registry.by_code_name.contains_key(&record.code_name) => {
                        warn!(
                            "Skipping duplicate bone {} on line {}",
                            record.code_name, line.line_number
                        );
                    }
                    Some(record) => {
                        registry
                            .by_code_name
                            .insert(record.code_name.clone(), registry.records.len());
                        registry.records.push(record);
                    }
                    None => warn!("Skipping malformed bone record: {line:?}"),
                },
                _ => warn!("Unexpected bone data key: {line:?}"),
            }
        }

        registry
    }

    fn parse_record(line: &ConfigLine) -> Option<BoneRecord> {
        Some(BoneRecord {
            code_name: line.string(0)?,
            display_name: line.string(1)?,
            family: line.parse_param(2).ok()?,
            parent: line.string(3),
        })
    }

    fn get(&self, code_name: &str) -> Option<&BoneRecord> {
        self.by_code_name
            .get(code_name)
            .map(|&index| &self.records[index])
    }
}

static REGISTRY: LazyLock<BoneRegistry> =
    LazyLock::new(|| BoneRegistry::parse(include_str!("bone_data.txt")));

/// All known bones, parents before children.
pub fn known_bones() -> &'static [BoneRecord] {
    &REGISTRY.records
}

pub fn bone_record(code_name: &str) -> Option<&'static BoneRecord> {
    REGISTRY.get(code_name)
}

pub fn display_name(code_name: &str) -> String {
    bone_record(code_name)
        .map(|record| record.display_name.clone())
        .unwrap_or_else(|| code_name.to_string())
}

pub fn family(code_name: &str) -> BoneFamily {
    bone_record(code_name)
        .map(|record| record.family)
        .unwrap_or_default()
}

/// The code name of the bone on the opposite side of the body, if `code_name` is sided.
pub fn twin_name(code_name: &str) -> Option<String> {
    if let Some(stem) = code_name.strip_suffix("_l") {
        Some(format!("{stem}_r"))
    } else {
        code_name
            .strip_suffix("_r")
            .map(|stem| format!("{stem}_l"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_bone() {
        assert_eq!(display_name("j_kao"), "Head");
        assert_eq!(family("j_kao"), BoneFamily::Face);
        assert_eq!(display_name("j_ude_a_l"), "Left Arm");
        assert_eq!(family("j_te_r"), BoneFamily::Hands);
    }

    #[test]
    fn unknown_bone_falls_back() {
        assert_eq!(display_name("j_made_up"), "j_made_up");
        assert_eq!(family("j_made_up"), BoneFamily::Unknown);
        assert!(bone_record("j_made_up").is_none());
    }

    #[test]
    fn twins() {
        assert_eq!(twin_name("j_ude_a_l").as_deref(), Some("j_ude_a_r"));
        assert_eq!(twin_name("j_ude_a_r").as_deref(), Some("j_ude_a_l"));
        assert_eq!(twin_name("j_kao"), None);
    }

    #[test]
    fn parents_precede_children() {
        let bones = known_bones();
        assert!(!bones.is_empty());
        assert_eq!(bones[0].code_name, "n_root");
        assert_eq!(bones[0].parent, None);

        for (index, bone) in bones.iter().enumerate() {
            if let Some(parent) = &bone.parent {
                let parent_index = bones
                    .iter()
                    .position(|b| &b.code_name == parent)
                    .unwrap();
                assert!(parent_index < index, "{} before {}", parent, bone.code_name);
            }
        }
    }

    #[test]
    fn every_sided_bone_has_a_known_twin() {
        for bone in known_bones() {
            if let Some(twin) = twin_name(&bone.code_name) {
                assert!(bone_record(&twin).is_some(), "missing twin {twin}");
            }
        }
    }

    #[test]
    fn malformed_records_are_skipped() {
        let registry = BoneRegistry::parse("BONE lonely\nBONE j_x \"X\" Spine\nFOO bar\n");
        assert_eq!(registry.records.len(), 1);
        assert_eq!(registry.get("j_x").unwrap().family, BoneFamily::Spine);
    }

    #[test]
    fn duplicate_records_keep_the_first() {
        let registry = BoneRegistry::parse(
            "BONE j_x \"First\" Spine\nBONE j_y \"Y\" Legs j_x\nBONE j_x \"Second\" Tail\n",
        );
        assert_eq!(registry.records.len(), 2);
        assert_eq!(registry.get("j_x").unwrap().display_name, "First");
        assert_eq!(registry.get("j_y").unwrap().code_name, "j_y");
    }
}
