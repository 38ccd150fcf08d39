pub mod clip;
pub mod decode;
pub mod frames;
