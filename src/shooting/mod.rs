//! Shooting module - shot meter state machine and launch velocity solver

mod meter;
mod trajectory;

pub use meter::*;
pub use trajectory::*;
