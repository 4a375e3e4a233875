pub mod app;
pub mod mods;
