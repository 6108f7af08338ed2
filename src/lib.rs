pub mod ai;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod logging;
pub mod provider;
pub mod service;
pub mod session;
pub mod web;

pub use ai::{choose_computer_action, run_auto_battle, ActionWeights, ComputerChoice};
pub use config::AppConfig;
pub use crate::core::{
    battle::{resolve_action, BattleOptions, BattleSession},
    factory::{create_combatant, CreateCombatantOptions},
    replay::replay_battle,
    state::{ActionOutcome, BattleAction, BattleHistory, BattleTurn, Combatant, CombatantStatus, Side, TurnAction},
};
pub use data::{BaseStats, Creature, Page, PageCursor};
pub use error::{BattleError, ConfigError, LookupError, ProviderError};
pub use provider::{DataProvider, PokeApiClient};
pub use service::{CreatureService, ServiceOptions};
pub use session::BrowseSession;
