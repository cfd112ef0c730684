//! UI module - shot meter presentation

mod meter;

pub use meter::*;
