use strum::{Display, EnumCount, EnumIter, EnumString};

/// Which quantity of a bone transform is being read or edited.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Display, EnumCount, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BoneAttribute {
    Position,
    /// Forward-kinematic position.
    FkPosition,
    #[default]
    Rotation,
    /// Forward-kinematic rotation.
    FkRotation,
    Scale,
}

/// The coordinate frame a transform value is expressed in.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Display, EnumCount, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PosingSpace {
    /// Relative to the bone's own rest orientation.
    #[default]
    Local,
    Parent,
    /// Model space of the whole character.
    Character,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn textual_forms() {
        assert_eq!(BoneAttribute::FkPosition.to_string(), "fk_position");
        assert_eq!(BoneAttribute::from_str("FK_ROTATION"), Ok(BoneAttribute::FkRotation));
        assert_eq!(PosingSpace::from_str("character"), Ok(PosingSpace::Character));
        assert!(BoneAttribute::from_str("skew").is_err());
    }

    #[test]
    fn every_attribute_reads_back() {
        for attribute in BoneAttribute::iter() {
            assert_eq!(BoneAttribute::from_str(&attribute.to_string()), Ok(attribute));
        }
        assert_eq!(BoneAttribute::iter().count(), BoneAttribute::COUNT);
    }
}
