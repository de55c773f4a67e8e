use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use skirmish_types::{
    army::{Element, TroopCount},
    battle::{
        BattleAction, BattleCasualties, BattleData, BattlePhase, BattleResult, BattleSide,
        BattleType, Combatant,
    },
    common::ResourceGroup,
    errors::{GameError, Result},
    map::{NEUTRAL_TERRAIN_BONUS, Position},
};

use crate::{models::army::Army, prng::Lcg};

/// Hard cap on combat turns; a battle produces at most two phases per turn.
const MAX_TURNS: u8 = 10;

const CRIT_CHANCE: f64 = 0.10;
const CRIT_MULTIPLIER: f64 = 2.0;
const SKILL_CHANCE: f64 = 0.30;

/// Elemental advantage swing: +25% attacking into a beaten element, -25%
/// attacking into a dominant one.
const ELEMENTAL_EDGE: f64 = 0.25;

/// Mitigation pivot of the diminishing-return damage curve.
const MITIGATION_PIVOT: f64 = 100.0;
/// Scales raw strike damage down for multi-turn pacing.
const DAMAGE_SCALE: f64 = 0.1;

/// Share of lost troops the hospital recovers as wounded instead of dead.
const HOSPITAL_RECOVERY_RATE: f64 = 0.5;

/// Flat reward credited to a victorious attacker. Does not scale with the
/// defender's actual holdings.
const VICTORY_LOOT: ResourceGroup = ResourceGroup::new(500, 200, 100);

const VICTORY_HERO_XP: u32 = 50;
const DEFEAT_HERO_XP: u32 = 25;

/// Resolution is a one-way transition: once a result exists it is history.
#[derive(Debug, Clone)]
enum BattleState {
    Pending,
    Resolved(BattleResult),
}

/// The battle aggregate: two opposing armies at a location, resolved at most
/// once into an immutable [`BattleResult`].
///
/// Resolution is pure and synchronous over the armies plus one owned PRNG
/// instance, so independent battles can be resolved concurrently without
/// coordination.
#[derive(Debug, Clone)]
pub struct Battle {
    pub id: Uuid,
    pub battle_type: BattleType,
    pub attacker: Combatant,
    pub defender: Combatant,
    pub location: Position,
    attacker_army: Army,
    defender_army: Army,
    state: BattleState,
    pub created_at: DateTime<Utc>,
}

impl Battle {
    pub fn new(
        battle_type: BattleType,
        attacker: Combatant,
        defender: Combatant,
        location: Position,
        attacker_army: Army,
        defender_army: Army,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            battle_type,
            attacker,
            defender,
            location,
            attacker_army,
            defender_army,
            state: BattleState::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn attacker_army(&self) -> &Army {
        &self.attacker_army
    }

    pub fn defender_army(&self) -> &Army {
        &self.defender_army
    }

    pub fn result(&self) -> Option<&BattleResult> {
        match &self.state {
            BattleState::Pending => None,
            BattleState::Resolved(result) => Some(result),
        }
    }

    /// Resolves the battle. Callable exactly once per battle; every random
    /// draw comes from a generator seeded with `seed`, so the same inputs
    /// replay the same phase log and casualties.
    ///
    /// The attacker always fights on neutral ground; `defender_terrain_bonus`
    /// is the map-supplied multiplier for the defender's position.
    pub fn resolve(&mut self, seed: u64, defender_terrain_bonus: f64) -> Result<&BattleResult> {
        if let BattleState::Resolved(_) = self.state {
            return Err(GameError::BattleAlreadyResolved(self.id));
        }

        let mut rng = Lcg::new(seed);

        // ====================================================================
        // STEP 1: Starting powers and the one-shot elemental modifier
        // ====================================================================

        let mut attacker_power = self.attacker_army.power(NEUTRAL_TERRAIN_BONUS) as i64;
        let mut defender_power = self.defender_army.power(defender_terrain_bonus) as i64;

        let modifier = elemental_modifier(
            self.attacker_army.hero().map(|h| h.element),
            self.defender_army.hero().map(|h| h.element),
        );
        attacker_power = (attacker_power as f64 * modifier).floor() as i64;

        debug!(
            battle_id = %self.id,
            attacker_power,
            defender_power,
            elemental_modifier = modifier,
            "Battle powers computed"
        );

        // ====================================================================
        // STEP 2: Turn loop, up to MAX_TURNS
        // ====================================================================

        // Ties in hero speed favor the attacker striking first.
        let first_side = if self.attacker_army.speed() >= self.defender_army.speed() {
            BattleSide::Attacker
        } else {
            BattleSide::Defender
        };

        let mut phases: Vec<BattlePhase> = Vec::new();
        let mut turn = 1u8;

        while turn <= MAX_TURNS && attacker_power > 0 && defender_power > 0 {
            for (action, side) in [
                (BattleAction::Attack, first_side),
                (BattleAction::CounterAttack, first_side.opponent()),
            ] {
                let (striker_army, striker_power, target_power) = match side {
                    BattleSide::Attacker => {
                        (&self.attacker_army, attacker_power, &mut defender_power)
                    }
                    BattleSide::Defender => {
                        (&self.defender_army, defender_power, &mut attacker_power)
                    }
                };

                let phase = strike(&mut rng, turn, action, side, striker_army, striker_power, *target_power);
                *target_power -= phase.damage as i64;
                let target_left = *target_power;
                phases.push(phase);

                // No counterstrike from a side that just got wiped out.
                if action == BattleAction::Attack && target_left <= 0 {
                    break;
                }
            }
            turn += 1;
        }

        let winner = decide_winner(attacker_power, defender_power);

        // ====================================================================
        // STEP 3: Casualties, loot, hero experience
        // ====================================================================

        // Casualty rates come from the same seeded generator as the combat
        // rolls (attacker's draw first), keeping full-battle replays exact.
        let attacker_rate = casualty_rate(&mut rng, winner == BattleSide::Attacker);
        let defender_rate = casualty_rate(&mut rng, winner == BattleSide::Defender);

        let attacker_casualties = split_casualties(self.attacker_army.troops(), attacker_rate);
        let defender_casualties = split_casualties(self.defender_army.troops(), defender_rate);

        let (loot, hero_xp_gained) = match winner {
            BattleSide::Attacker => (VICTORY_LOOT, VICTORY_HERO_XP),
            BattleSide::Defender => (ResourceGroup::default(), DEFEAT_HERO_XP),
        };

        debug!(
            battle_id = %self.id,
            winner = ?winner,
            turns = phases.last().map(|p| p.turn).unwrap_or(0),
            phases = phases.len(),
            "Battle resolved"
        );

        self.state = BattleState::Resolved(BattleResult {
            winner,
            attacker_casualties,
            defender_casualties,
            loot,
            hero_xp_gained,
            phases,
        });

        match &self.state {
            BattleState::Resolved(result) => Ok(result),
            BattleState::Pending => unreachable!("state was just set"),
        }
    }

    /// Plain serializable projection for storage.
    pub fn to_data(&self) -> BattleData {
        BattleData {
            id: self.id,
            battle_type: self.battle_type.clone(),
            attacker: self.attacker,
            defender: self.defender,
            location: self.location,
            attacker_army: (&self.attacker_army).into(),
            defender_army: (&self.defender_army).into(),
            result: self.result().cloned(),
            created_at: self.created_at,
        }
    }
}

/// One-shot attack multiplier from the elemental matchup. Applied to the
/// attacker's power only, before the turn loop.
fn elemental_modifier(attacker: Option<Element>, defender: Option<Element>) -> f64 {
    match (attacker, defender) {
        (Some(a), Some(d)) if a.beats(d) => 1.0 + ELEMENTAL_EDGE,
        (Some(a), Some(d)) if d.beats(a) => 1.0 - ELEMENTAL_EDGE,
        _ => 1.0,
    }
}

/// Diminishing-return strike damage, never below 1 so no battle can
/// stalemate on zero damage.
fn strike_damage(striker_power: i64, target_power: i64, critical: bool) -> u64 {
    let base = striker_power as f64
        * (1.0 - target_power as f64 / (target_power as f64 + MITIGATION_PIVOT));
    let hit = if critical { base * CRIT_MULTIPLIER } else { base };
    (hit * DAMAGE_SCALE).max(1.0).floor() as u64
}

/// Executes one strike: crit roll, damage, skill-activation roll. The skill
/// roll is only taken when the striking side has a hero with at least one
/// skill; on a hit the first skill in the list is recorded, log-only.
fn strike(
    rng: &mut Lcg,
    turn: u8,
    action: BattleAction,
    side: BattleSide,
    striker: &Army,
    striker_power: i64,
    target_power: i64,
) -> BattlePhase {
    let critical = rng.next() < CRIT_CHANCE;
    let damage = strike_damage(striker_power, target_power, critical);

    let skill_activated = striker
        .hero()
        .filter(|hero| !hero.skills.is_empty())
        .and_then(|hero| (rng.next() < SKILL_CHANCE).then(|| hero.skills[0].name.clone()));

    BattlePhase {
        turn,
        action,
        side,
        damage,
        critical,
        skill_activated,
    }
}

/// Winner at termination; ties go to the defender.
fn decide_winner(attacker_power: i64, defender_power: i64) -> BattleSide {
    if attacker_power > defender_power {
        BattleSide::Attacker
    } else {
        BattleSide::Defender
    }
}

/// Casualty rate draw: 10-30% of the winner's troops, 50-80% of the loser's.
fn casualty_rate(rng: &mut Lcg, won: bool) -> f64 {
    if won {
        0.1 + rng.next() * 0.2
    } else {
        0.5 + rng.next() * 0.3
    }
}

/// Splits one side's losses into dead and wounded per tier, omitting tiers
/// with zero losses.
fn split_casualties(troops: &[TroopCount], rate: f64) -> BattleCasualties {
    let mut casualties = BattleCasualties::default();

    for stack in troops {
        let lost = (stack.count as f64 * rate).floor() as u32;
        if lost == 0 {
            continue;
        }

        let dead = (lost as f64 * (1.0 - HOSPITAL_RECOVERY_RATE)).floor() as u32;
        let wounded = lost - dead;

        if dead > 0 {
            casualties.dead.push(stack.with_count(dead));
        }
        if wounded > 0 {
            casualties.wounded.push(stack.with_count(wounded));
        }
    }

    casualties
}
