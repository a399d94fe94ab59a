pub mod conflicts;
pub mod optimization;
pub mod resolutions;
