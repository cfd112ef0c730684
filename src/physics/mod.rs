//! Physics module - rigid-body interface and the point-mass integrator behind it

mod body;
mod systems;

pub use body::*;
pub use systems::*;
