//! Ball module - components, possession, and holder interaction

mod components;
mod interaction;
mod possession;

pub use components::*;
pub use interaction::*;
pub use possession::*;
