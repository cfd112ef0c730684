//! Headless simulation - app builder and match setup shared with the game binary

pub mod app_builder;
pub mod setup;

pub use app_builder::HeadlessAppBuilder;
pub use setup::{ActorSpawn, setup_match, spawn_actor, spawn_ball};
