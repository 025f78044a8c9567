pub mod bins;
pub mod options;
pub mod plan;
pub mod sweep;
pub mod version;
