use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::data::creature::BaseStats;
use crate::error::BattleError;

fn default_multiplier() -> f64 {
    1.0
}

/// Absent current HP means "full"; `normalized` clamps it to `max_hp`.
fn full_hp() -> u32 {
    u32::MAX
}

/// A creature with live battle state.
///
/// The serde shape matches what the web front-end posts back each turn, so
/// missing fields fall back to a fresh combatant's values.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Combatant {
    pub name: String,
    #[serde(default)]
    pub stats: BaseStats,
    #[serde(default)]
    pub max_hp: u32,
    #[serde(default = "full_hp")]
    pub current_hp: u32,
    #[serde(default = "default_multiplier")]
    pub attack_multiplier: f64,
    #[serde(default = "default_multiplier")]
    pub defense_multiplier: f64,
    /// Halves the next incoming attack/special, then clears.
    #[serde(default, alias = "defend_active")]
    pub defending: bool,
    /// Display names of known moves, used to label special attacks.
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub sprite_url: Option<String>,
}

impl Combatant {
    pub fn new(name: &str, stats: BaseStats, moves: Vec<String>) -> Self {
        let max_hp = stats.hp.max(1);
        Self {
            name: name.to_string(),
            stats,
            max_hp,
            current_hp: max_hp,
            attack_multiplier: 1.0,
            defense_multiplier: 1.0,
            defending: false,
            moves,
            types: Vec::new(),
            sprite_url: None,
        }
    }

    /// Repairs a deserialised payload: max HP from stats when absent, current
    /// HP within `0..=max_hp`.
    pub fn normalized(mut self) -> Self {
        if self.max_hp == 0 {
            self.max_hp = self.stats.hp.max(1);
        }
        self.current_hp = self.current_hp.min(self.max_hp);
        self
    }

    pub fn status(&self) -> CombatantStatus {
        if self.current_hp == 0 {
            CombatantStatus::Fainted
        } else if self.defending {
            CombatantStatus::Defending
        } else {
            CombatantStatus::Active
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp as f64
    }

    /// Clears the acting combatant's per-turn multipliers. `defending` is left
    /// alone; only an incoming hit consumes it.
    pub fn begin_turn(&mut self) {
        self.attack_multiplier = 1.0;
        self.defense_multiplier = 1.0;
    }

    /// Restores full HP and clears transient state.
    pub fn reset(&mut self) {
        self.current_hp = self.max_hp;
        self.defending = false;
        self.begin_turn();
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CombatantStatus {
    Active,
    Defending,
    Fainted,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BattleAction {
    Attack,
    Special,
    Defend,
    Heal,
}

impl BattleAction {
    pub const ALL: [BattleAction; 4] = [
        BattleAction::Attack,
        BattleAction::Heal,
        BattleAction::Defend,
        BattleAction::Special,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BattleAction::Attack => "attack",
            BattleAction::Special => "special",
            BattleAction::Defend => "defend",
            BattleAction::Heal => "heal",
        }
    }

    pub fn deals_damage(&self) -> bool {
        matches!(self, BattleAction::Attack | BattleAction::Special)
    }
}

impl fmt::Display for BattleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BattleAction {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "attack" => Ok(BattleAction::Attack),
            "special" => Ok(BattleAction::Special),
            "defend" => Ok(BattleAction::Defend),
            "heal" => Ok(BattleAction::Heal),
            other => Err(BattleError::UnknownAction(other.to_string())),
        }
    }
}

/// What one action did.
///
/// `new_hp` and `fainted` describe the target for attack/special and the
/// actor for defend/heal.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActionOutcome {
    pub action: BattleAction,
    pub actor: String,
    pub target: String,
    pub damage: u32,
    pub healed: u32,
    pub new_hp: u32,
    pub fainted: bool,
    pub move_name: Option<String>,
    /// The target's defensive stance absorbed half of this hit.
    pub defended: bool,
    pub log: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TurnAction {
    pub side: Side,
    pub action: BattleAction,
    /// Announcement logged just before this action resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
}

impl TurnAction {
    pub fn new(side: Side, action: BattleAction) -> Self {
        Self {
            side,
            action,
            intent: None,
        }
    }

    pub fn announced(side: Side, action: BattleAction, intent: String) -> Self {
        Self {
            side,
            action,
            intent: Some(intent),
        }
    }
}

/// One resolved turn: the actions taken, their log lines and every random
/// draw consumed, so the turn can be replayed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BattleTurn {
    pub turn: u32,
    pub actions: Vec<TurnAction>,
    pub log: Vec<String>,
    pub rng: Vec<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BattleHistory {
    pub turns: Vec<BattleTurn>,
}
