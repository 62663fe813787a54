//! Domain models for the raw materials inventory

mod category;
mod material;
mod movement;
mod supplier;

pub use category::*;
pub use material::*;
pub use movement::*;
pub use supplier::*;
