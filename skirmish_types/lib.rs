pub mod army;
pub mod battle;
pub mod common;
pub mod errors;
pub mod map;

pub use errors::Result;
