use serde::{Deserialize, Serialize};

/// A battle location on the world map. Movement and travel times are handled
/// by the map system; battles only record where they happened.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Terrain multiplier applied to the defending side's power. Neutral ground
/// is 1.0; the map system supplies environment-specific values (e.g. 1.05
/// for mountains).
pub const NEUTRAL_TERRAIN_BONUS: f64 = 1.0;
