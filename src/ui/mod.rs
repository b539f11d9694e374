//! Terminal I/O: keyboard input and the diff-based renderer.

pub mod input;
pub mod renderer;
