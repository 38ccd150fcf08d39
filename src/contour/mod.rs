pub mod smooth;
pub mod write;
