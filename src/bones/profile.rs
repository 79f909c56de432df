use std::{cell::RefCell, collections::BTreeMap};

use tracing::debug;

use super::{
    BoneAttribute, BoneContainer, BoneTransform, BoneTransformView, PosingSpace, bone_data,
};

/// Saved per-bone transform values for one character.
#[derive(Debug, Default)]
pub struct CharacterProfile {
    pub name: String,
    bones: RefCell<BTreeMap<String, BoneTransform>>,
}

impl CharacterProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bones: RefCell::default(),
        }
    }

    pub fn transform(&self, code_name: &str) -> Option<BoneTransform> {
        self.bones.borrow().get(code_name).copied()
    }

    pub fn set_transform(&self, code_name: impl Into<String>, transform: BoneTransform) {
        self.bones.borrow_mut().insert(code_name.into(), transform);
    }

    /// A copy of all stored transforms, ordered by code name.
    pub fn transforms(&self) -> Vec<(String, BoneTransform)> {
        self.bones
            .borrow()
            .iter()
            .map(|(code_name, transform)| (code_name.clone(), *transform))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bones.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.borrow().is_empty()
    }

    fn set_value(&self, code_name: &str, attribute: BoneAttribute, value: glam::Vec3) {
        self.bones
            .borrow_mut()
            .entry(code_name.to_string())
            .or_default()
            .set_attribute_value(attribute, value);
    }
}

impl BoneContainer for CharacterProfile {
    fn bone_transform_values(
        &self,
        attribute: BoneAttribute,
        space: PosingSpace,
    ) -> Vec<BoneTransformView<'_>> {
        self.bones
            .borrow()
            .iter()
            .map(|(code_name, transform)| {
                BoneTransformView::from_raw(self, code_name.as_str(), transform, attribute, space)
            })
            .collect()
    }

    fn update_bone_transform_value(
        &self,
        info: &BoneTransformView<'_>,
        attribute: BoneAttribute,
        mirror_changes: bool,
    ) {
        self.set_value(info.code_name(), attribute, info.value);
        debug!(
            "Profile \"{}\": set {} of {} to {}",
            self.name,
            attribute,
            info.code_name(),
            info.value
        );

        if mirror_changes {
            if let Some(twin) = bone_data::twin_name(info.code_name()) {
                self.set_value(&twin, attribute, BoneTransform::reflect(attribute, info.value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn edits_grow_the_profile() {
        let profile = CharacterProfile::new("Alisaie");
        assert!(profile.is_empty());

        let mut view = BoneTransformView::from_raw(
            &profile,
            "j_kao",
            &BoneTransform::default(),
            BoneAttribute::Scale,
            PosingSpace::Local,
        );
        view.value = Vec3::splat(1.2);
        view.push_changes(BoneAttribute::Scale, false);

        assert_eq!(profile.len(), 1);
        assert_eq!(profile.transform("j_kao").unwrap().scaling, Vec3::splat(1.2));
    }

    #[test]
    fn mirrored_edit_writes_reflected_twin() {
        let profile = CharacterProfile::new("mirror");
        profile.set_transform("j_sako_r", BoneTransform::default());

        let mut views = profile.bone_transform_values(BoneAttribute::Rotation, PosingSpace::Parent);
        assert_eq!(views.len(), 1);
        views[0].value = Vec3::new(10.0, 20.0, 30.0);
        views[0].push_changes(BoneAttribute::Rotation, true);

        assert_eq!(
            profile.transform("j_sako_r").unwrap().rotation,
            Vec3::new(10.0, 20.0, 30.0)
        );
        assert_eq!(
            profile.transform("j_sako_l").unwrap().rotation,
            Vec3::new(10.0, -20.0, -30.0)
        );
    }

    #[test]
    fn views_read_stored_values() {
        let profile = CharacterProfile::new("values");
        profile.set_transform(
            "j_asi_a_l",
            BoneTransform::default().with_kinematic_translation(Vec3::X),
        );
        profile.set_transform("j_kao", BoneTransform::default());

        let views = profile.bone_transform_values(BoneAttribute::FkPosition, PosingSpace::Local);
        let values: Vec<_> = views.iter().map(|v| (v.code_name(), v.value)).collect();
        assert_eq!(values, [("j_asi_a_l", Vec3::X), ("j_kao", Vec3::ZERO)]);
    }
}
