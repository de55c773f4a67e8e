pub mod army;
pub mod hero;
