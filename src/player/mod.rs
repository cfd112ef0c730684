//! Player module - components and the actor controller

mod components;
mod controller;

pub use components::*;
pub use controller::*;
