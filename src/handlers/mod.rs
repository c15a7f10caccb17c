pub mod applications;
pub mod stats;
