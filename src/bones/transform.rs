use glam::{EulerRot, Mat4, Quat, Vec3};

use super::BoneAttribute;

/// The raw editable values of one bone. Rotations are XYZ euler angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneTransform {
    pub translation: Vec3,
    pub kinematic_translation: Vec3,
    pub rotation: Vec3,
    pub kinematic_rotation: Vec3,
    pub scaling: Vec3,
}

impl Default for BoneTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            kinematic_translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            kinematic_rotation: Vec3::ZERO,
            scaling: Vec3::ONE,
        }
    }
}

impl BoneTransform {
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_kinematic_translation(mut self, translation: Vec3) -> Self {
        self.kinematic_translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_kinematic_rotation(mut self, rotation: Vec3) -> Self {
        self.kinematic_rotation = rotation;
        self
    }

    pub fn with_scaling(mut self, scaling: Vec3) -> Self {
        self.scaling = scaling;
        self
    }

    /// The value held for `attribute`. Anything that is not one of the position or rotation
    /// attributes reads the scaling.
    pub fn attribute_value(&self, attribute: BoneAttribute) -> Vec3 {
        match attribute {
            BoneAttribute::Position => self.translation,
            BoneAttribute::FkPosition => self.kinematic_translation,
            BoneAttribute::Rotation => self.rotation,
            BoneAttribute::FkRotation => self.kinematic_rotation,
            _ => self.scaling,
        }
    }

    pub fn set_attribute_value(&mut self, attribute: BoneAttribute, value: Vec3) {
        let field = match attribute {
            BoneAttribute::Position => &mut self.translation,
            BoneAttribute::FkPosition => &mut self.kinematic_translation,
            BoneAttribute::Rotation => &mut self.rotation,
            BoneAttribute::FkRotation => &mut self.kinematic_rotation,
            _ => &mut self.scaling,
        };
        *field = value;
    }

    pub fn is_edited(&self) -> bool {
        *self != Self::default()
    }

    /// Mirror `value` across the character's YZ plane, so that it can be applied to the bone on
    /// the opposite side of the body.
    pub fn reflect(attribute: BoneAttribute, value: Vec3) -> Vec3 {
        match attribute {
            BoneAttribute::Position | BoneAttribute::FkPosition => {
                Vec3::new(-value.x, value.y, value.z)
            }
            BoneAttribute::Rotation | BoneAttribute::FkRotation => {
                Vec3::new(value.x, -value.y, -value.z)
            }
            BoneAttribute::Scale => value,
        }
    }

    /// Matrix of the standard translation, rotation and scaling. Kinematic values are not
    /// included.
    pub fn to_mat4(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        );
        Mat4::from_scale_rotation_translation(self.scaling, rotation, self.translation)
    }
}
