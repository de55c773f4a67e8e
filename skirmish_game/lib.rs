pub mod battle;
pub mod models;
pub mod prng;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
