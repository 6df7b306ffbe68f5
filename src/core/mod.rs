// Core utilities shared by the engine and game layers

pub mod config;
pub mod math;

#[allow(unused_imports)]
pub use config::{BattleConfig, ConfigError};
