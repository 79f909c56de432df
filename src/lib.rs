pub mod bones;
pub mod config;
