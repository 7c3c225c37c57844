//! Creatures: the species table and the combat unit model.

#![allow(unused_imports)]

pub mod species;
pub mod unit;

pub use species::*;
pub use unit::*;
