//! Engine plumbing: scheduler, state stack, configuration and the audio and
//! input surfaces.

#![allow(unused_imports)]

pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod scheduler;
pub mod state_stack;

pub use audio::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use input::*;
pub use scheduler::*;
pub use state_stack::*;
