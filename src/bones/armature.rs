use std::cell::RefCell;

use ahash::HashMap;
use glam::Mat4;
use tracing::{debug, warn};

use super::{
    BoneAttribute, BoneContainer, BoneModel, BoneTransform, BoneTransformView, CharacterProfile,
    PosingSpace,
    bone_data::{self, BoneRecord},
};

#[derive(Debug, thiserror::Error)]
pub enum ArmatureError {
    #[error("Duplicate bone: {0}")]
    DuplicateBone(String),

    #[error("Bone {bone} has parent index {parent} that does not precede it")]
    InvalidParent { bone: String, parent: usize },

    #[error("Bone {bone} has unknown parent {parent}")]
    UnknownParent { bone: String, parent: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModelBone {
    pub name: String,
    pub parent: Option<usize>,
    pub transform: BoneTransform,
}

impl ModelBone {
    pub fn new(name: impl Into<String>, parent: Option<usize>) -> Self {
        Self {
            name: name.into(),
            parent,
            transform: BoneTransform::default(),
        }
    }
}

impl BoneModel for ModelBone {
    fn bone_name(&self) -> &str {
        &self.name
    }

    fn transformation(&self) -> BoneTransform {
        self.transform
    }
}

/// A live skeleton. Bones are stored parents first.
#[derive(Debug)]
pub struct Armature {
    bones: RefCell<Vec<ModelBone>>,
    by_name: HashMap<String, usize>,
}

impl Armature {
    pub fn new(bones: Vec<ModelBone>) -> Result<Self, ArmatureError> {
        let mut by_name = HashMap::default();

        for (index, bone) in bones.iter().enumerate() {
            if let Some(parent) = bone.parent {
                if parent >= index {
                    return Err(ArmatureError::InvalidParent {
                        bone: bone.name.clone(),
                        parent,
                    });
                }
            }

            if by_name.insert(bone.name.clone(), index).is_some() {
                return Err(ArmatureError::DuplicateBone(bone.name.clone()));
            }
        }

        Ok(Self {
            bones: RefCell::new(bones),
            by_name,
        })
    }

    /// An armature of every known bone in its rest pose.
    pub fn reference() -> Result<Self, ArmatureError> {
        Self::from_records(bone_data::known_bones())
    }

    /// Build an armature in its rest pose from bone records. Parents must be listed before their
    /// children.
    pub fn from_records(records: &[BoneRecord]) -> Result<Self, ArmatureError> {
        let mut by_name: HashMap<&str, usize> = HashMap::default();
        let mut bones = Vec::new();

        for record in records {
            let parent = match &record.parent {
                Some(parent) => Some(*by_name.get(parent.as_str()).ok_or_else(|| {
                    ArmatureError::UnknownParent {
                        bone: record.code_name.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };

            by_name.insert(&record.code_name, bones.len());
            bones.push(ModelBone::new(record.code_name.clone(), parent));
        }

        Self::new(bones)
    }

    pub fn len(&self) -> usize {
        self.bones.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.borrow().is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn bone(&self, name: &str) -> Option<ModelBone> {
        let index = self.index_of(name)?;
        Some(self.bones.borrow()[index].clone())
    }

    /// The bone's transform composed with all of its parents.
    pub fn model_transform(&self, bone_index: usize) -> Mat4 {
        let bones = self.bones.borrow();
        let mut transform = Mat4::IDENTITY;
        let mut current = Some(bone_index);

        while let Some(index) = current {
            let bone = &bones[index];
            transform = bone.transform.to_mat4() * transform;
            current = bone.parent;
        }

        transform
    }

    /// Copy every transform of `profile` onto the matching bone. Returns how many bones were
    /// updated.
    pub fn apply_profile(&self, profile: &CharacterProfile) -> usize {
        let mut bones = self.bones.borrow_mut();
        let mut applied = 0;

        for (code_name, transform) in profile.transforms() {
            match self.by_name.get(&code_name) {
                Some(&index) => {
                    bones[index].transform = transform;
                    applied += 1;
                }
                None => warn!(
                    "Profile \"{}\" has bone {} which is not in the armature",
                    profile.name, code_name
                ),
            }
        }

        debug!("Applied {applied} bones from profile \"{}\"", profile.name);

        applied
    }

    fn set_value(&self, name: &str, attribute: BoneAttribute, value: glam::Vec3) -> bool {
        let Some(index) = self.index_of(name) else {
            return false;
        };
        self.bones.borrow_mut()[index]
            .transform
            .set_attribute_value(attribute, value);
        true
    }
}

impl BoneContainer for Armature {
    fn bone_transform_values(
        &self,
        attribute: BoneAttribute,
        space: PosingSpace,
    ) -> Vec<BoneTransformView<'_>> {
        self.bones
            .borrow()
            .iter()
            .map(|bone| BoneTransformView::from_model(self, bone, attribute, space))
            .collect()
    }

    fn update_bone_transform_value(
        &self,
        info: &BoneTransformView<'_>,
        attribute: BoneAttribute,
        mirror_changes: bool,
    ) {
        if !self.set_value(info.code_name(), attribute, info.value) {
            warn!("Armature has no bone {}", info.code_name());
            return;
        }

        debug!(
            "Set {} of {} to {} ({})",
            attribute,
            info.code_name(),
            info.value,
            info.reference_frame()
        );

        if mirror_changes {
            if let Some(twin) = bone_data::twin_name(info.code_name()) {
                let value = BoneTransform::reflect(attribute, info.value);
                if self.set_value(&twin, attribute, value) {
                    debug!("Mirrored {} of {} to {}", attribute, twin, value);
                }
            }
        }
    }
}
