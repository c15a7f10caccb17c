pub mod applications;
pub mod stats;
pub mod storage;
