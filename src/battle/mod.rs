//! Battle states and the rules they animate.

#![allow(unused_imports)]

pub mod encounter;
pub mod menu;
pub mod message;
pub mod round;
pub mod session;
pub mod turn;

pub use encounter::*;
pub use menu::*;
pub use message::*;
pub use round::*;
pub use session::*;
pub use turn::*;
