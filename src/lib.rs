//! Space Shooter: a single-screen arcade shooter.
//!
//! Core modules:
//! - `entities`: plain game data
//! - `compute`: movement, firing, formation and the Playing tick
//! - `collision`: AABB overlap and hit resolution
//! - `controller`: screen state machine, frame composition, fixed-rate loop
//! - `config`: tunable constants
//!
//! Rendering and input live outside the core; the binary provides a terminal
//! frontend.

pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod controller;
pub mod entities;
pub mod input;
pub mod scene;

pub use config::GameConfig;
pub use controller::{run, ButtonLayout, GameController, InputSource, Renderer};
