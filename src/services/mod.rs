pub mod copier;
pub mod core;
pub mod fs_utils;
pub mod jobs;
pub mod reference;
