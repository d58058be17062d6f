//! CLI command implementations.

pub mod check;
pub mod common;
pub mod parse;
pub mod render;
pub mod version;
pub mod watch;
