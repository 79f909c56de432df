use glam::Vec3;
use tracing::warn;

use super::{BoneAttribute, BoneFamily, BoneTransform, PosingSpace, bone_data};

/// Something that hands out [BoneTransformView]s and takes edits back.
pub trait BoneContainer {
    /// One view per bone, in container order.
    fn bone_transform_values(
        &self,
        attribute: BoneAttribute,
        space: PosingSpace,
    ) -> Vec<BoneTransformView<'_>>;

    /// Write the view's value back into the bone named by the view. When `mirror_changes` is
    /// set, the reflected value is also written to the bone's twin, if the container has one.
    fn update_bone_transform_value(
        &self,
        info: &BoneTransformView<'_>,
        attribute: BoneAttribute,
        mirror_changes: bool,
    );
}

/// A live bone that can report its current transform.
pub trait BoneModel {
    fn bone_name(&self) -> &str;

    fn transformation(&self) -> BoneTransform;
}

/// An editable snapshot of one attribute of one bone, tied to the container it came from.
pub struct BoneTransformView<'a> {
    source: &'a dyn BoneContainer,

    code_name: String,
    pub display_name: String,
    pub family: BoneFamily,

    pub value: Vec3,
    attribute: BoneAttribute,
    reference_frame: PosingSpace,
}

impl<'a> BoneTransformView<'a> {
    fn new(
        source: &'a dyn BoneContainer,
        code_name: String,
        value: Vec3,
        attribute: BoneAttribute,
        reference_frame: PosingSpace,
    ) -> Self {
        let display_name = bone_data::display_name(&code_name);
        let family = bone_data::family(&code_name);

        Self {
            source,
            code_name,
            display_name,
            family,
            value,
            attribute,
            reference_frame,
        }
    }

    /// Snapshot `attribute` of a live bone.
    pub fn from_model(
        source: &'a dyn BoneContainer,
        model: &(impl BoneModel + ?Sized),
        attribute: BoneAttribute,
        reference_frame: PosingSpace,
    ) -> Self {
        let value = model.transformation().attribute_value(attribute);
        Self::new(
            source,
            model.bone_name().to_string(),
            value,
            attribute,
            reference_frame,
        )
    }

    /// Snapshot `attribute` of stored transform values, e.g. from a character profile.
    pub fn from_raw(
        source: &'a dyn BoneContainer,
        code_name: impl Into<String>,
        transform: &BoneTransform,
        attribute: BoneAttribute,
        reference_frame: PosingSpace,
    ) -> Self {
        Self::new(
            source,
            code_name.into(),
            transform.attribute_value(attribute),
            attribute,
            reference_frame,
        )
    }

    pub fn code_name(&self) -> &str {
        &self.code_name
    }

    pub fn attribute(&self) -> BoneAttribute {
        self.attribute
    }

    pub fn reference_frame(&self) -> PosingSpace {
        self.reference_frame
    }

    /// Push the current value back to the source container.
    ///
    /// `attribute` is forwarded as given, even when it is not the attribute this view was
    /// created for.
    pub fn push_changes(&self, attribute: BoneAttribute, mirror_changes: bool) {
        if attribute != self.attribute {
            warn!(
                "Pushing {} of {} from a view of its {}",
                attribute, self.code_name, self.attribute
            );
        }

        self.source
            .update_bone_transform_value(self, attribute, mirror_changes);
    }
}

impl std::fmt::Debug for BoneTransformView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoneTransformView")
            .field("code_name", &self.code_name)
            .field("display_name", &self.display_name)
            .field("family", &self.family)
            .field("value", &self.value)
            .field("attribute", &self.attribute)
            .field("reference_frame", &self.reference_frame)
            .finish_non_exhaustive()
    }
}
