mod armature;
mod attribute;
pub mod bone_data;
mod profile;
mod transform;
mod transform_info;

pub use armature::*;
pub use attribute::*;
pub use bone_data::BoneFamily;
pub use profile::*;
pub use transform::*;
pub use transform_info::*;
