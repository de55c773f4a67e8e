use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{army::TroopCount, common::ResourceGroup, map::Position};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Deserialize, Serialize)]
pub enum BattleType {
    Pvp,
    Pve,
    Arena,
    Conquest,
    Rally,
}

/// One side of a battle, either a player-owned force or an NPC garrison.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Deserialize, Serialize)]
pub enum Combatant {
    Player(Uuid),
    Npc(u32),
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Deserialize, Serialize)]
pub enum BattleSide {
    Attacker,
    Defender,
}

impl BattleSide {
    pub fn opponent(&self) -> BattleSide {
        match self {
            BattleSide::Attacker => BattleSide::Defender,
            BattleSide::Defender => BattleSide::Attacker,
        }
    }
}

/// The first strike of a turn is an `Attack`; the response, if the target
/// survives it, is a `CounterAttack`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Deserialize, Serialize)]
pub enum BattleAction {
    Attack,
    CounterAttack,
}

/// One logged strike within a turn. The phase list is append-only during
/// resolution and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlePhase {
    pub turn: u8,
    pub action: BattleAction,
    pub side: BattleSide,
    pub damage: u64,
    pub critical: bool,
    #[serde(default)]
    pub skill_activated: Option<String>,
}

/// Losses for one side, split into dead and hospital-bound wounded.
/// Tiers with zero losses are omitted.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleCasualties {
    pub dead: Vec<TroopCount>,
    pub wounded: Vec<TroopCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub winner: BattleSide,
    pub attacker_casualties: BattleCasualties,
    pub defender_casualties: BattleCasualties,
    pub loot: ResourceGroup,
    pub hero_xp_gained: u32,
    pub phases: Vec<BattlePhase>,
}

/// Plain serializable projection of one side's army for storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlePartyData {
    pub owner_id: Uuid,
    pub troops: Vec<TroopCount>,
    #[serde(default)]
    pub hero_id: Option<Uuid>,
}

/// Snapshot of a whole battle (identity, participants, armies, result)
/// handed to the persistence layer. The storage format itself is an
/// external concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleData {
    pub id: Uuid,
    pub battle_type: BattleType,
    pub attacker: Combatant,
    pub defender: Combatant,
    pub location: Position,
    pub attacker_army: BattlePartyData,
    pub defender_army: BattlePartyData,
    #[serde(default)]
    pub result: Option<BattleResult>,
    pub created_at: DateTime<Utc>,
}
