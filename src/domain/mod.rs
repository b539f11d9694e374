//! Pure game rules: no I/O, no terminal, no randomness.
//! Everything here is driven by plain function calls and is unit-tested
//! in isolation.

pub mod mask;
pub mod round;
