//! Foundation layer: math aliases, shared tolerances, and logging setup.

pub mod logging;
pub mod math;
