//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod clean;
mod read_match;
mod simulate;
mod validate_roster;

pub use clean::Clean;
pub use read_match::ReadMatch;
pub use simulate::Simulate;
pub use validate_roster::ValidateRoster;

use arena_core::{MatchState, TurnLogEntry, Winner};
use console::style;

/// Render a winner for terminal output.
pub(crate) fn describe_winner(state: &MatchState) -> String {
    match state.winner {
        Some(Winner::Side(side)) => format!("{} ({})", side, state.player(side).player_id),
        Some(Winner::Draw) => "draw".to_string(),
        None => "undecided".to_string(),
    }
}

/// Print one team block: hp, defenses, energy and statuses per combatant.
pub(crate) fn print_teams(state: &MatchState) {
    for player in [&state.player_a, &state.player_b] {
        println!(
            "{} {}",
            style(format!("Team {}:", player.side)).bold().yellow(),
            player.player_id
        );
        for combatant in &player.team {
            let marker = if combatant.alive {
                style("●").green()
            } else {
                style("✗").red()
            };
            let statuses: Vec<String> = combatant
                .statuses
                .iter()
                .map(|status| status.kind.tag().to_string())
                .collect();
            println!(
                "  {} {} {:<16} HP {:>3}/{:<3} shield {:<3} armor {:<3} energy {:>2}  {}",
                marker,
                combatant.id,
                combatant.name,
                combatant.hp,
                combatant.max_hp,
                combatant.shield,
                combatant.armor,
                combatant.energy.total(),
                style(statuses.join(", ")).dim()
            );
        }
    }
}

/// Print a resolved turn log, one line per action.
pub(crate) fn print_log(turn: u32, log: &[TurnLogEntry]) {
    println!("{}", style(format!("── Turn {turn} ──")).bold().cyan());
    for entry in log {
        let outcome = if entry.is_cancelled() {
            style(format!(
                "cancelled{}",
                entry
                    .result
                    .reason
                    .map(|reason| format!(" ({reason:?})"))
                    .unwrap_or_default()
            ))
            .red()
            .to_string()
        } else {
            entry
                .result
                .effects
                .iter()
                .map(|effect| {
                    let mut line = format!("{} {}", effect.kind, effect.target);
                    if let Some(value) = effect.value {
                        line.push_str(&format!(" {value}"));
                    }
                    if let Some(detail) = &effect.detail {
                        line.push_str(&format!(" [{detail}]"));
                    }
                    line
                })
                .collect::<Vec<_>>()
                .join("; ")
        };
        println!(
            "  {:<7} {} {:<20} {}",
            entry.wave,
            entry.caster,
            entry.skill_name,
            outcome
        );
    }
}
