//! Foundation utilities: math types and frame timing

pub mod math;
pub mod time;
