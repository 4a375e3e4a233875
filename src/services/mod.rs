pub mod archive;
pub mod backup;
pub mod config;
pub mod core;
pub mod fs_utils;
pub mod installer;
pub mod regens;
