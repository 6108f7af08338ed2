use crate::core::state::Combatant;
use crate::data::creature::{move_label, Creature};

#[derive(Clone, Debug)]
pub struct CreateCombatantOptions {
    /// Known moves kept for labelling special attacks.
    pub max_moves: usize,
    pub name: Option<String>,
}

impl Default for CreateCombatantOptions {
    fn default() -> Self {
        Self {
            max_moves: 4,
            name: None,
        }
    }
}

/// Builds a full-HP combatant from a creature's base stats.
pub fn create_combatant(creature: &Creature, options: CreateCombatantOptions) -> Combatant {
    let moves: Vec<String> = creature
        .moves
        .iter()
        .take(options.max_moves)
        .map(|slug| move_label(slug))
        .collect();
    let name = options.name.unwrap_or_else(|| creature.display_name());

    let mut combatant = Combatant::new(&name, creature.stats.clone(), moves);
    combatant.types = creature.types.clone();
    combatant.sprite_url = creature.sprite_url.clone();
    combatant
}
