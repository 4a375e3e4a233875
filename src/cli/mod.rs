//! Command line front end

pub mod args;
pub mod dispatch;

pub use args::*;

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
