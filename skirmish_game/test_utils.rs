use rand::Rng;
use uuid::Uuid;

use skirmish_types::{
    army::{Element, FactionBonus, TroopCount},
    battle::{BattleType, Combatant},
    errors::Result,
    map::Position,
};

use crate::{
    battle::Battle,
    models::{
        army::Army,
        hero::{Hero, Skill},
    },
};

/// Builds a validated troop list from `(tier, count)` pairs.
pub fn troops(stacks: &[(u8, u32)]) -> Result<Vec<TroopCount>> {
    stacks
        .iter()
        .map(|&(tier, count)| TroopCount::new(tier, count))
        .collect()
}

#[derive(Default, Clone)]
pub struct HeroFactoryOptions {
    pub id: Option<Uuid>,
    pub player_id: Option<Uuid>,
    pub name: Option<String>,
    pub element: Option<Element>,
    pub strength: Option<u32>,
    pub speed: Option<u8>,
    pub skills: Option<Vec<String>>,
}

#[derive(Default, Clone)]
pub struct ArmyFactoryOptions {
    pub id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    pub troops: Option<Vec<TroopCount>>,
    pub faction_bonus: Option<FactionBonus>,
    pub hero: Option<Hero>,
}

#[derive(Default, Clone)]
pub struct BattleFactoryOptions {
    pub battle_type: Option<BattleType>,
    pub attacker: Option<Combatant>,
    pub defender: Option<Combatant>,
    pub location: Option<Position>,
    pub attacker_army: Option<Army>,
    pub defender_army: Option<Army>,
}

pub fn hero_factory(options: HeroFactoryOptions) -> Hero {
    let default_name: String = format!("hero_{}", rand::thread_rng().r#gen::<u32>());
    Hero::new(
        options.id,
        options.player_id.unwrap_or_else(Uuid::new_v4),
        options.name.unwrap_or(default_name),
        options.element.unwrap_or(Element::Fire),
        options.strength.unwrap_or(100),
        options.speed.unwrap_or(0),
        options
            .skills
            .unwrap_or_default()
            .into_iter()
            .map(Skill::new)
            .collect(),
    )
}

pub fn army_factory(options: ArmyFactoryOptions) -> Army {
    Army::new(
        options.id,
        options.owner_id.unwrap_or_else(Uuid::new_v4),
        options
            .troops
            .unwrap_or_else(|| troops(&[(1, 100)]).unwrap()),
        options.faction_bonus.unwrap_or_default(),
        options.hero,
    )
    .expect("factory troops are valid")
}

pub fn battle_factory(options: BattleFactoryOptions) -> Battle {
    let attacker_army = options.attacker_army.unwrap_or_else(|| {
        army_factory(ArmyFactoryOptions {
            troops: Some(troops(&[(1, 100)]).unwrap()),
            ..Default::default()
        })
    });
    let defender_army = options.defender_army.unwrap_or_else(|| {
        army_factory(ArmyFactoryOptions {
            troops: Some(troops(&[(1, 50)]).unwrap()),
            ..Default::default()
        })
    });

    Battle::new(
        options.battle_type.unwrap_or(BattleType::Pvp),
        options
            .attacker
            .unwrap_or(Combatant::Player(attacker_army.owner_id)),
        options
            .defender
            .unwrap_or(Combatant::Player(defender_army.owner_id)),
        options.location.unwrap_or(Position { x: 0, y: 0 }),
        attacker_army,
        defender_army,
    )
}
