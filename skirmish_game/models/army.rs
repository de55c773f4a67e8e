use serde::{Deserialize, Serialize};
use uuid::Uuid;

use skirmish_types::{
    army::{FactionBonus, TroopCount, tier_power},
    battle::{BattleCasualties, BattlePartyData},
    errors::{GameError, Result},
};

use crate::models::hero::Hero;

/// One side's forces entering a battle: troops, an optional hero and the
/// faction-wide bonus multipliers.
///
/// Deserialization funnels through [`Army::new`], so the tier-uniqueness
/// invariant holds for armies restored from storage too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawArmy")]
pub struct Army {
    pub id: Uuid,
    pub owner_id: Uuid,
    troops: Vec<TroopCount>,
    faction_bonus: FactionBonus,
    hero: Option<Hero>,
}

/// Unvalidated wire shape of [`Army`].
#[derive(Deserialize)]
struct RawArmy {
    id: Uuid,
    owner_id: Uuid,
    troops: Vec<TroopCount>,
    faction_bonus: FactionBonus,
    hero: Option<Hero>,
}

impl TryFrom<RawArmy> for Army {
    type Error = GameError;

    fn try_from(raw: RawArmy) -> Result<Self> {
        Army::new(
            Some(raw.id),
            raw.owner_id,
            raw.troops,
            raw.faction_bonus,
            raw.hero,
        )
    }
}

impl Army {
    /// Builds an army, rejecting out-of-range tiers and duplicate tier
    /// entries up front so resolution stays total over its inputs.
    pub fn new(
        id: Option<Uuid>,
        owner_id: Uuid,
        troops: Vec<TroopCount>,
        faction_bonus: FactionBonus,
        hero: Option<Hero>,
    ) -> Result<Self> {
        let mut seen: Vec<u8> = Vec::with_capacity(troops.len());
        for troop in &troops {
            tier_power(troop.tier())?;
            if seen.contains(&troop.tier()) {
                return Err(GameError::DuplicateTroopTier(troop.tier()));
            }
            seen.push(troop.tier());
        }

        Ok(Army {
            id: id.unwrap_or(Uuid::new_v4()),
            owner_id,
            troops,
            faction_bonus,
            hero,
        })
    }

    pub fn hero(&self) -> Option<&Hero> {
        self.hero.as_ref()
    }

    pub fn set_hero(&mut self, hero: Option<Hero>) {
        self.hero = hero;
    }

    pub fn troops(&self) -> &[TroopCount] {
        &self.troops
    }

    pub fn faction_bonus(&self) -> FactionBonus {
        self.faction_bonus
    }

    /// Strike-order speed of the side; 0 without a hero.
    pub fn speed(&self) -> u8 {
        self.hero.as_ref().map(|h| h.speed).unwrap_or(0)
    }

    /// Returns the total raw number of troops in the army.
    pub fn immensity(&self) -> u32 {
        let hero_count: u32 = self.hero.as_ref().map(|_| 1).unwrap_or(0);
        self.troops.iter().map(|t| t.count).sum::<u32>() + hero_count
    }

    /// Raw troop power before any multipliers.
    pub fn troop_power(&self) -> u64 {
        self.troops.iter().map(|t| t.power()).sum()
    }

    /// The army's scalar battle power:
    /// `floor((troops + hero) * faction_bonus * terrain_bonus)`.
    ///
    /// Only the stronger of the two faction multipliers applies. An army
    /// with no troops and no hero has power 0.
    pub fn power(&self, terrain_bonus: f64) -> u64 {
        let troop_power = self.troop_power();
        let hero_power = self.hero.as_ref().map(|h| h.power()).unwrap_or(0) as u64;
        let bonus = self.faction_bonus.effective_multiplier();

        ((troop_power + hero_power) as f64 * bonus * terrain_bonus).floor() as u64
    }

    /// Folds battle casualties back into the troop counts. Dead troops are
    /// gone; wounded ones leave the army too, bound for the caller's
    /// hospital queue.
    pub fn apply_battle_result(&mut self, casualties: &BattleCasualties, hero_xp: u32) {
        for lost in casualties.dead.iter().chain(casualties.wounded.iter()) {
            if let Some(stack) = self.troops.iter_mut().find(|t| t.tier() == lost.tier()) {
                stack.count = stack.count.saturating_sub(lost.count);
            }
        }

        if let Some(hero) = self.hero.as_mut() {
            hero.gain_experience(hero_xp);
        }
    }
}

impl From<&Army> for BattlePartyData {
    fn from(army: &Army) -> Self {
        BattlePartyData {
            owner_id: army.owner_id,
            troops: army.troops.clone(),
            hero_id: army.hero.as_ref().map(|h| h.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_types::army::Element;

    use crate::test_utils::{
        ArmyFactoryOptions, HeroFactoryOptions, army_factory, hero_factory, troops,
    };

    #[test]
    fn test_army_power_from_tiers() -> Result<()> {
        // 100 tier-1 units at 10 power each
        let army = army_factory(ArmyFactoryOptions {
            troops: Some(troops(&[(1, 100)])?),
            ..Default::default()
        });
        assert_eq!(army.power(1.0), 1000);

        let half = army_factory(ArmyFactoryOptions {
            troops: Some(troops(&[(1, 50)])?),
            ..Default::default()
        });
        assert_eq!(half.power(1.0), 500);

        // 10*10 + 5*30 + 2*100 + 1*300 = 750
        let mixed = army_factory(ArmyFactoryOptions {
            troops: Some(troops(&[(1, 10), (2, 5), (3, 2), (4, 1)])?),
            ..Default::default()
        });
        assert_eq!(mixed.power(1.0), 750);
        Ok(())
    }

    #[test]
    fn test_empty_army_has_zero_power() {
        let army = army_factory(ArmyFactoryOptions {
            troops: Some(vec![]),
            ..Default::default()
        });
        assert_eq!(army.power(1.0), 0);
        assert_eq!(army.immensity(), 0);
    }

    #[test]
    fn test_hero_adds_power_and_speed() -> Result<()> {
        let hero = hero_factory(HeroFactoryOptions {
            element: Some(Element::Fire),
            strength: Some(200),
            speed: Some(7),
            ..Default::default()
        });
        let army = army_factory(ArmyFactoryOptions {
            troops: Some(troops(&[(1, 100)])?),
            hero: Some(hero),
            ..Default::default()
        });

        assert_eq!(army.power(1.0), 1200);
        assert_eq!(army.speed(), 7);
        assert_eq!(army.immensity(), 101);
        Ok(())
    }

    #[test]
    fn test_faction_bonus_uses_strongest_multiplier() -> Result<()> {
        let army = army_factory(ArmyFactoryOptions {
            troops: Some(troops(&[(1, 100)])?),
            faction_bonus: Some(FactionBonus {
                attack_multiplier: Some(1.2),
                defense_multiplier: Some(1.5),
            }),
            ..Default::default()
        });

        // 1000 * 1.5, never 1000 * 1.2 * 1.5
        assert_eq!(army.power(1.0), 1500);
        Ok(())
    }

    #[test]
    fn test_terrain_bonus_applies_and_floors() -> Result<()> {
        let army = army_factory(ArmyFactoryOptions {
            troops: Some(troops(&[(1, 33)])?),
            ..Default::default()
        });
        // floor(330 * 1.05) = 346
        assert_eq!(army.power(1.05), 346);
        Ok(())
    }

    #[test]
    fn test_duplicate_tier_rejected() -> Result<()> {
        let result = Army::new(
            None,
            Uuid::new_v4(),
            troops(&[(2, 10), (2, 5)])?,
            FactionBonus::default(),
            None,
        );
        assert!(matches!(result, Err(GameError::DuplicateTroopTier(2))));
        Ok(())
    }

    #[test]
    fn test_deserialization_rejects_invalid_troops() -> Result<()> {
        let army = army_factory(ArmyFactoryOptions {
            troops: Some(troops(&[(1, 10), (3, 2)])?),
            ..Default::default()
        });
        let json = serde_json::to_string(&army).expect("army serializes");
        let restored: Army = serde_json::from_str(&json).expect("valid army deserializes");
        assert_eq!(restored, army);

        // An out-of-range tier in a stored snapshot errors instead of
        // panicking later inside power().
        let corrupt_tier = json.replace(r#""tier":3"#, r#""tier":9"#);
        assert!(serde_json::from_str::<Army>(&corrupt_tier).is_err());

        // So does a duplicated tier entry.
        let duplicated = json.replace(r#""tier":3"#, r#""tier":1"#);
        assert!(serde_json::from_str::<Army>(&duplicated).is_err());
        Ok(())
    }

    #[test]
    fn test_apply_battle_result_subtracts_losses() -> Result<()> {
        let mut army = army_factory(ArmyFactoryOptions {
            troops: Some(troops(&[(1, 100), (2, 40)])?),
            ..Default::default()
        });

        let casualties = BattleCasualties {
            dead: troops(&[(1, 30)])?,
            wounded: troops(&[(1, 30), (2, 10)])?,
        };
        army.apply_battle_result(&casualties, 0);

        assert_eq!(army.troops()[0].count, 40);
        assert_eq!(army.troops()[1].count, 30);
        Ok(())
    }
}
