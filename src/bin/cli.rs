use clap::Parser;
use inquire::{Select, Text};
use std::fmt;
use std::sync::Arc;

use pokeview::ai::run_auto_battle;
use pokeview::config::AppConfig;
use pokeview::core::battle::{BattleOptions, BattleSession};
use pokeview::core::state::{BattleAction, Combatant, Side};
use pokeview::core::utils::{pick_index, rng_source};
use pokeview::data::creature::Creature;
use pokeview::data::pagination::Page;
use pokeview::provider::PokeApiClient;
use pokeview::service::{CreatureService, ServiceOptions};
use pokeview::session::BrowseSession;

#[derive(Parser)]
#[command(name = "pokeview")]
#[command(about = "Browse creatures and battle them from the terminal")]
struct Cli {
    /// Creatures per page
    #[arg(long)]
    page_size: Option<u32>,
    /// Seed for battle randomness
    #[arg(long)]
    seed: Option<u64>,
    /// Provider base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuChoice {
    Browse,
    Search,
    Battle,
    Simulate,
    Exit,
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuChoice::Browse => "📋 Browse",
            MenuChoice::Search => "🔍 Search",
            MenuChoice::Battle => "⚔️  Battle",
            MenuChoice::Simulate => "🤖 Simulate a battle",
            MenuChoice::Exit => "🚪 Exit",
        };
        f.write_str(label)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum BrowseCommand {
    Next,
    Previous,
    Detail(usize),
    Back,
}

fn parse_browse_command(input: &str) -> Result<BrowseCommand, String> {
    let mut parts = input.split_whitespace();
    let head = parts.next().unwrap_or("").to_lowercase();
    match head.as_str() {
        "n" | "next" => Ok(BrowseCommand::Next),
        "p" | "prev" | "previous" => Ok(BrowseCommand::Previous),
        "b" | "back" => Ok(BrowseCommand::Back),
        "d" | "detail" => {
            let number = parts
                .next()
                .ok_or_else(|| "Usage: d <number>".to_string())?;
            match number.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(BrowseCommand::Detail(n)),
                _ => Err(format!("'{}' is not a valid number.", number)),
            }
        }
        "" => Err("Please enter a command.".to_string()),
        other => Err(format!("Unknown command '{}'.", other)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pokeview::logging::init("pokeview=warn");

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    config.validate()?;

    println!("╔═══════════════════════════════════════╗");
    println!("║          ⚡ Pokeview Console ⚡        ║");
    println!("╚═══════════════════════════════════════╝");
    println!();

    let provider = Arc::new(PokeApiClient::from_config(&config));
    let service = CreatureService::new(provider, ServiceOptions::from_config(&config));
    let mut rng = rng_source(config.seed);

    let menu = vec![
        MenuChoice::Browse,
        MenuChoice::Search,
        MenuChoice::Battle,
        MenuChoice::Simulate,
        MenuChoice::Exit,
    ];
    loop {
        let choice = Select::new("What would you like to do?", menu.clone()).prompt();
        match choice {
            Ok(MenuChoice::Browse) => browse(&service, config.page_size).await,
            Ok(MenuChoice::Search) => search(&service).await,
            Ok(MenuChoice::Battle) => battle(&service, &config, &mut rng).await,
            Ok(MenuChoice::Simulate) => simulate(&service, &config, &mut rng).await,
            Ok(MenuChoice::Exit) | Err(_) => break,
        }
    }

    println!("Goodbye! 👋");
    Ok(())
}

fn prompt_text(message: &str) -> Option<String> {
    Text::new(message).prompt().ok()
}

// =============================================================================
// Browse & search
// =============================================================================

async fn browse(service: &CreatureService, page_size: u32) {
    let mut session = BrowseSession::new(service.clone(), page_size);
    println!("⏳ Loading page...");
    let mut page = session.load_page(Some(0)).await;

    loop {
        print_page(&page);
        let Some(input) = prompt_text("[n]ext, [p]revious, [d]etail <#>, [b]ack:") else {
            return;
        };
        match parse_browse_command(&input) {
            Ok(BrowseCommand::Next) => {
                let before = session.cursor().clone();
                println!("⏳ Loading page...");
                let result = session.next_page().await;
                if result.is_empty() && result.cursor == before {
                    println!("You are on the last page.");
                } else {
                    page = result;
                }
            }
            Ok(BrowseCommand::Previous) => {
                let before = session.cursor().clone();
                let result = session.previous_page().await;
                if result.is_empty() && result.cursor == before {
                    println!("You are on the first page.");
                } else {
                    page = result;
                }
            }
            Ok(BrowseCommand::Detail(n)) => match page.creatures.get(n - 1) {
                Some(creature) => print_detail(creature),
                None => println!("There is no #{} on this page.", n),
            },
            Ok(BrowseCommand::Back) => return,
            Err(message) => println!("❌ {}", message),
        }
    }
}

async fn search(service: &CreatureService) {
    let Some(query) = prompt_text("Name or id:") else {
        return;
    };
    if query.trim().is_empty() {
        println!("❌ Please enter a name to search for.");
        return;
    }
    println!("🔍 Searching for {}...", query.trim());
    match service.search_by_name(&query).await {
        Ok(creature) => print_detail(&creature),
        Err(e) => println!("❌ {}", e),
    }
}

fn print_page(page: &Page) {
    let cursor = &page.cursor;
    println!();
    if page.creatures.is_empty() {
        println!("No results. The data provider may be unavailable.");
    } else {
        println!(
            "{:>3}  {:>5}  {:<16} {:<18} {:>8} {:>9} {:>8}",
            "#", "ID", "Name", "Types", "Height", "Weight", "Base XP"
        );
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        for (i, creature) in page.creatures.iter().enumerate() {
            println!(
                "{:>3}  {:>5}  {:<16} {:<18} {:>7.1}m {:>7.1}kg {:>8}",
                i + 1,
                creature.id,
                creature.display_name(),
                creature.types.join("/"),
                creature.height_m(),
                creature.weight_kg(),
                creature.base_experience
            );
        }
    }
    println!(
        "Page {} of {} ({} total)",
        cursor.current_page(),
        cursor.total_pages().max(1),
        cursor.count()
    );
    println!();
}

fn print_detail(creature: &Creature) {
    let stats = &creature.stats;
    println!();
    println!("══════ {} (#{}) ══════", creature.display_name(), creature.id);
    println!("  Types: {}", creature.types.join(" / "));
    println!("  Abilities: {}", creature.abilities.join(" / "));
    println!("  Height: {:.1} m | Weight: {:.1} kg", creature.height_m(), creature.weight_kg());
    println!("  Base experience: {}", creature.base_experience);
    println!(
        "  Stats: HP {} ATK {} DEF {} SPA {} SPD {} SPE {} (total {})",
        stats.hp,
        stats.attack,
        stats.defense,
        stats.special_attack,
        stats.special_defense,
        stats.speed,
        stats.total()
    );
    if let Some(description) = &creature.description {
        println!("  {}", description);
    }
    if let Some(sprite) = &creature.sprite_url {
        println!("  Sprite: {}", sprite);
    }
    println!();
}

// =============================================================================
// Battle
// =============================================================================

async fn choose_creature(service: &CreatureService, roster: &[String], message: &str) -> Option<Combatant> {
    let name = if roster.is_empty() {
        prompt_text(message)?
    } else {
        Select::new(message, roster.to_vec())
            .with_page_size(10)
            .prompt()
            .ok()?
    };
    match service.battle_combatant(&name).await {
        Ok(combatant) => Some(combatant),
        Err(e) => {
            println!("❌ {}", e);
            None
        }
    }
}

async fn battle(service: &CreatureService, config: &AppConfig, rng: &mut dyn FnMut() -> f64) {
    let roster = service.list_names(config.battle_roster_size).await;
    let Some(player) = choose_creature(service, &roster, "Choose your creature (type to filter):").await else {
        return;
    };
    let Some(opponent_name) = pick_index(rng, roster.len()).map(|i| roster[i].clone()) else {
        println!("❌ No opponents available right now.");
        return;
    };
    let opponent = match service.battle_combatant(&opponent_name).await {
        Ok(combatant) => combatant,
        Err(e) => {
            println!("❌ {}", e);
            return;
        }
    };

    let mut session = BattleSession::new(player, opponent, BattleOptions::default());
    let mut last_log_idx = 0;

    println!("════════════════════════════════════════");
    println!("          ⚔️  Battle start! ⚔️          ");
    println!("════════════════════════════════════════");
    print_new_logs(&session, &mut last_log_idx);

    let actions = BattleAction::ALL.to_vec();
    while !session.is_over() {
        print_battle_status(&session);
        let action = match Select::new("What will you do?", actions.clone()).prompt() {
            Ok(action) => action,
            Err(_) => {
                println!("You fled the battle.");
                return;
            }
        };
        if let Err(e) = session.play_turn(action, rng) {
            println!("❌ {}", e);
            break;
        }
        println!();
        print_new_logs(&session, &mut last_log_idx);
        println!();
    }

    print_result(&session);
}

async fn simulate(service: &CreatureService, config: &AppConfig, rng: &mut dyn FnMut() -> f64) {
    let roster = service.list_names(config.battle_roster_size).await;
    let Some(first) = choose_creature(service, &roster, "First creature:").await else {
        return;
    };
    let Some(second) = choose_creature(service, &roster, "Second creature:").await else {
        return;
    };

    let session = run_auto_battle(&first, &second, rng);
    let mut last_log_idx = 0;
    print_new_logs(&session, &mut last_log_idx);
    print_result(&session);
}

fn print_battle_status(session: &BattleSession) {
    println!("─────────────────────────────────────────");
    println!("  Turn {}", session.turn + 1);
    println!("─────────────────────────────────────────");
    for (label, mon) in [("Foe", &session.opponent), ("You", &session.player)] {
        let stance = if mon.defending { " 🛡️" } else { "" };
        println!(
            "  [{}] {} ({}) {}{}",
            label,
            mon.name,
            mon.types.join("/"),
            hp_bar_string(mon.current_hp, mon.max_hp),
            stance
        );
    }
    println!();
}

fn hp_bar_string(hp: u32, max_hp: u32) -> String {
    let ratio = if max_hp == 0 { 0.0 } else { hp as f64 / max_hp as f64 };
    let bars = ((ratio * 10.0) as usize).min(10);
    let filled = "█".repeat(bars);
    let empty = "░".repeat(10 - bars);
    format!("[{}{}] {}/{} ({}%)", filled, empty, hp, max_hp, (ratio * 100.0) as u32)
}

fn print_new_logs(session: &BattleSession, last_idx: &mut usize) {
    for line in &session.log[*last_idx..] {
        println!("  📝 {}", line);
    }
    *last_idx = session.log.len();
}

fn print_result(session: &BattleSession) {
    println!("════════════════════════════════════════");
    match session.winner() {
        Some(Side::Player) => println!("      🎉 {} wins! 🎉", session.player.name),
        Some(Side::Opponent) => println!("      💔 {} wins...", session.opponent.name),
        None => println!("      🤝 No winner after {} turns.", session.turn),
    }
    println!("════════════════════════════════════════");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browse_commands_parse_short_and_long_forms() {
        assert_eq!(parse_browse_command("n"), Ok(BrowseCommand::Next));
        assert_eq!(parse_browse_command("Previous"), Ok(BrowseCommand::Previous));
        assert_eq!(parse_browse_command("d 3"), Ok(BrowseCommand::Detail(3)));
        assert_eq!(parse_browse_command(" back "), Ok(BrowseCommand::Back));
    }

    #[test]
    fn invalid_browse_input_is_reported_not_fatal() {
        assert!(parse_browse_command("").is_err());
        assert!(parse_browse_command("d").is_err());
        assert!(parse_browse_command("d zero").is_err());
        assert!(parse_browse_command("d 0").is_err());
        assert!(parse_browse_command("jump").is_err());
    }

    #[test]
    fn hp_bar_never_overflows() {
        assert_eq!(hp_bar_string(0, 0), "[░░░░░░░░░░] 0/0 (0%)");
        assert!(hp_bar_string(100, 100).starts_with("[██████████]"));
    }
}
