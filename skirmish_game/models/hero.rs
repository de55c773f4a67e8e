use serde::{Deserialize, Serialize};
use uuid::Uuid;

use skirmish_types::army::Element;

/// A hero ability. Effects are resolved by the caller when rendering
/// reports; the battle engine only records which skill fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: Uuid,
    pub player_id: Uuid,
    pub name: String,
    pub element: Element,

    // State
    /// Hero level (max 100).
    pub level: u16,
    /// Accumulated experience points.
    pub experience: u32,
    /// Hero health percentage.
    pub health: u16,
    /// Base combat strength, grows with levels.
    pub strength: u32,
    /// Strike-order speed; the faster hero's side strikes first.
    pub speed: u8,
    /// Ordered ability list; the first entry is the one that can fire in battle.
    pub skills: Vec<Skill>,
}

/// Strength gained on each level up.
const STRENGTH_PER_LEVEL: u32 = 5;

impl Hero {
    pub fn new(
        id: Option<Uuid>,
        player_id: Uuid,
        name: impl Into<String>,
        element: Element,
        strength: u32,
        speed: u8,
        skills: Vec<Skill>,
    ) -> Self {
        Self {
            id: id.unwrap_or(Uuid::new_v4()),
            player_id,
            name: name.into(),
            element,
            level: 0,
            experience: 0,
            health: 100,
            strength,
            speed,
            skills,
        }
    }

    /// Checks if hero is still alive.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Hero contribution to army power.
    pub fn power(&self) -> u32 {
        self.strength
    }

    /// Total XP to get to next level (cap at 100).
    pub fn xp_for_next_level(&self) -> u32 {
        xp_for_level((self.level + 1).min(100))
    }

    /// Gain XP, handles autolevel + heal 100%. Returns gained levels.
    pub fn gain_experience(&mut self, gained: u32) -> u16 {
        if gained == 0 {
            return 0;
        }

        self.experience = self.experience.saturating_add(gained);
        let mut leveled = 0u16;
        loop {
            let need = self.xp_for_next_level();
            if self.experience < need {
                break;
            }
            self.level = (self.level + 1).min(100);
            self.strength = self.strength.saturating_add(STRENGTH_PER_LEVEL);
            self.health = 100; // full heal on level up
            leveled += 1;
            if self.level == 100 {
                break;
            }
        }
        leveled
    }
}

/// Total XP to get to a specific level: 50*(L^2+L).
fn xp_for_level(level: u16) -> u32 {
    (50u32)
        .saturating_mul(level as u32)
        .saturating_mul(level as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{HeroFactoryOptions, hero_factory};

    #[test]
    fn xp_and_leveling_uses_quadratic_curve() {
        let mut hero = hero_factory(HeroFactoryOptions::default());

        assert_eq!(hero.level, 0);
        let strength_before = hero.strength;

        // Cumulative: level 1 total = 100; level 2 total = 300.
        let gained1 = hero.gain_experience(100);
        assert_eq!(gained1, 1);
        assert_eq!(hero.level, 1);
        assert_eq!(hero.health, 100);
        assert_eq!(hero.strength, strength_before + 5);

        let gained2 = hero.gain_experience(200); // reach 300
        assert_eq!(gained2, 1);
        assert_eq!(hero.level, 2);
    }

    #[test]
    fn level_up_fully_heals() {
        let mut hero = hero_factory(HeroFactoryOptions::default());
        hero.health = 0;
        assert!(!hero.is_alive());

        hero.gain_experience(100); // level 1
        assert_eq!(hero.health, 100);
        assert!(hero.is_alive());
    }

    #[test]
    fn zero_xp_changes_nothing() {
        let mut hero = hero_factory(HeroFactoryOptions::default());
        assert_eq!(hero.gain_experience(0), 0);
        assert_eq!(hero.experience, 0);
        assert_eq!(hero.level, 0);
    }

    #[test]
    fn power_tracks_strength() {
        let hero = hero_factory(HeroFactoryOptions {
            strength: Some(230),
            ..Default::default()
        });
        assert_eq!(hero.power(), 230);
    }
}
