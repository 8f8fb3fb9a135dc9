//! Simulation engine for a side-scrolling fish shooter.
//!
//! The host drives [`compute::GameState`] once per frame with an elapsed
//! delta in milliseconds and then draws from [`compute::GameState::snapshot`].
//! Rendering, audio and persistence stay outside the engine behind small
//! collaborator traits.

pub mod ammo;
pub mod audio;
pub mod collision;
pub mod compute;
pub mod constants;
pub mod entities;
pub mod input;
pub mod power_up;
pub mod scheduler;
pub mod scoring;
pub mod spawn;
pub mod storage;
