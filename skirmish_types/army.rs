use serde::{Deserialize, Serialize};

use crate::errors::{GameError, Result};

/// Lowest and highest valid troop tiers.
pub const MIN_TROOP_TIER: u8 = 1;
pub const MAX_TROOP_TIER: u8 = 4;

/// Fixed per-unit power by tier (tier 1 through 4).
const TIER_POWERS: [u32; 4] = [10, 30, 100, 300];

/// Returns the per-unit power for a tier, or fails for tiers outside 1-4.
pub fn tier_power(tier: u8) -> Result<u32> {
    if !(MIN_TROOP_TIER..=MAX_TROOP_TIER).contains(&tier) {
        return Err(GameError::InvalidTroopTier(tier));
    }
    Ok(TIER_POWERS[(tier - 1) as usize])
}

/// A stack of same-tier troops on one side of a battle.
///
/// The tier is validated on every construction path, deserialization
/// included, so downstream power math never sees an out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTroopCount")]
pub struct TroopCount {
    tier: u8,
    pub count: u32,
}

/// Unvalidated wire shape of [`TroopCount`].
#[derive(Deserialize)]
struct RawTroopCount {
    tier: u8,
    count: u32,
}

impl TryFrom<RawTroopCount> for TroopCount {
    type Error = GameError;

    fn try_from(raw: RawTroopCount) -> Result<Self> {
        TroopCount::new(raw.tier, raw.count)
    }
}

impl TroopCount {
    pub fn new(tier: u8, count: u32) -> Result<Self> {
        tier_power(tier)?;
        Ok(Self { tier, count })
    }

    pub fn tier(&self) -> u8 {
        self.tier
    }

    /// A new stack of the same, already-validated tier.
    pub fn with_count(&self, count: u32) -> Self {
        Self {
            tier: self.tier,
            count,
        }
    }

    /// Combined power of the whole stack.
    pub fn power(&self) -> u64 {
        // Tier was validated at construction.
        TIER_POWERS[(self.tier - 1) as usize] as u64 * self.count as u64
    }
}

/// Hero elements, arranged in a fixed cyclic advantage triangle:
/// fire beats wind, wind beats water, water beats fire.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Wind,
    Water,
}

impl Element {
    pub fn beats(&self, other: Element) -> bool {
        matches!(
            (self, other),
            (Element::Fire, Element::Wind)
                | (Element::Wind, Element::Water)
                | (Element::Water, Element::Fire)
        )
    }
}

/// Faction-wide combat multipliers. Only the stronger of the two applies to
/// an army's power; a side never benefits from both at once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactionBonus {
    pub attack_multiplier: Option<f64>,
    pub defense_multiplier: Option<f64>,
}

impl FactionBonus {
    /// The effective multiplier: `max` of attack and defense, neutral 1.0
    /// when neither is set.
    pub fn effective_multiplier(&self) -> f64 {
        self.attack_multiplier
            .unwrap_or(1.0)
            .max(self.defense_multiplier.unwrap_or(1.0))
    }
}
